//! The entry arena: the shared model of a parsed table-literal document.
//!
//! Both dialect readers flatten their input into one ordered sequence of
//! [`Entry`] values. Declaration order is the only addressing scheme: the
//! validator and the serializer consume the sequence positionally, and a
//! value list is always aligned index-for-index with it.
//!
//! ## Core Types
//!
//! - [`Entry`]: one node of the parsed tree (label, nesting depth, glyph,
//!   declared type/default/range, plot metadata)
//! - [`Glyph`]: the rendering hint consumed by the external tree-view UI
//! - [`ParamType`]: the five declarable parameter types
//! - [`RangeDecl`]: a declared `[min-max]` range on a numeric parameter
//!
//! ## Examples
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let doc = schema_from_str(r#"cfg={density={type="Double",default=1.5}}"#).unwrap();
//! let entries = doc.entries();
//! assert_eq!(entries[0].label, "cfg");
//! assert_eq!(entries[1].label, "density");
//! assert_eq!(entries[1].ty, "Double");
//! assert_eq!(entries[1].default, "1.5");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering hint attached to every entry, consumed by the external
/// tree-view UI as a small integer code.
///
/// # Examples
///
/// ```rust
/// use luatab::Glyph;
///
/// assert_eq!(Glyph::Plain.code(), 0);
/// assert_eq!(Glyph::Expandable.code(), 15);
/// assert_eq!(Glyph::Series.code(), 37);
/// assert!(Glyph::Expandable.is_container());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Glyph {
    /// A plain leaf row (schema dialect), code 0.
    #[default]
    Plain,
    /// An expandable container whose children follow, code 15.
    Expandable,
    /// A non-expandable plot-series row (output dialect), code 37.
    Series,
}

impl Glyph {
    /// Returns the integer code the tree-view UI expects.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Glyph::Plain => 0,
            Glyph::Expandable => 15,
            Glyph::Series => 37,
        }
    }

    /// Returns `true` if this glyph marks a container entry.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Glyph::Expandable)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The five parameter types a vali document may declare.
///
/// Anything else (including an empty declaration) is unknown and is
/// silently skipped by the validator.
///
/// # Examples
///
/// ```rust
/// use luatab::ParamType;
///
/// assert_eq!("String[]".parse::<ParamType>(), Ok(ParamType::StringArray));
/// assert_eq!(ParamType::Double.to_string(), "Double");
/// assert!("Float".parse::<ParamType>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamType {
    Boolean,
    Double,
    Integer,
    String,
    StringArray,
}

impl FromStr for ParamType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boolean" => Ok(ParamType::Boolean),
            "Double" => Ok(ParamType::Double),
            "Integer" => Ok(ParamType::Integer),
            "String" => Ok(ParamType::String),
            "String[]" => Ok(ParamType::StringArray),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Boolean => "Boolean",
            ParamType::Double => "Double",
            ParamType::Integer => "Integer",
            ParamType::String => "String",
            ParamType::StringArray => "String[]",
        };
        write!(f, "{}", name)
    }
}

/// A declared `range={min,max}` clause on a Double or Integer parameter.
///
/// The bounds are kept as the declared text; the validator parses them
/// numerically only when a supplied value is itself a plain number.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeDecl {
    pub min: String,
    pub max: String,
}

impl RangeDecl {
    pub fn new(min: &str, max: &str) -> Self {
        RangeDecl {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// One node of a parsed table-literal document.
///
/// Entries are stored by value in a growable arena (`Vec<Entry>`) in
/// declaration order. The schema dialect fills `ty`/`default`/`range`;
/// the output-descriptor dialect fills the plot metadata fields. Container
/// entries carry neither.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Entry {
    /// The key as it appeared, including quoting for string-array elements
    /// and the `timeTableContent` sentinel for timetable placeholders.
    pub label: String,
    /// Nesting level; 0 is top level.
    pub indent: u8,
    /// Rendering hint for the tree-view UI.
    pub glyph: Glyph,

    /// Declared type text (`Boolean`, `Double`, ...); empty if undeclared.
    pub ty: String,
    /// Declared default, quotes stripped; empty if undeclared.
    pub default: String,
    /// Declared range; present only on ranged numeric parameters.
    pub range: Option<RangeDecl>,
    /// The value supplied by a loaded spec document for this position.
    pub spec_val: String,

    /// Output dialect: data file this series is read from.
    pub filename: String,
    /// Output dialect: 0-based data column of this series.
    pub col: Option<i64>,
    /// Output dialect: unit of this series.
    pub unit: String,
    /// Output dialect: 0-based column of the governing x-axis.
    pub x_col: Option<i64>,
    /// Output dialect: name of the governing x-axis.
    pub x_name: String,
    /// Output dialect: unit of the governing x-axis.
    pub x_unit: String,
}

impl Entry {
    /// Creates an entry with a label, depth and glyph; all other fields
    /// start empty.
    pub fn new(label: &str, indent: u8, glyph: Glyph) -> Self {
        Entry {
            label: label.to_string(),
            indent,
            glyph,
            ..Entry::default()
        }
    }

    /// Returns the declared type as a [`ParamType`], or `None` when the
    /// declaration is empty or unrecognised.
    #[inline]
    #[must_use]
    pub fn param_type(&self) -> Option<ParamType> {
        self.ty.parse().ok()
    }

    /// Returns `true` if this entry is a container whose children follow.
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.glyph.is_container()
    }

    /// Returns `true` if the label is a quoted string-array element.
    #[inline]
    #[must_use]
    pub fn has_quoted_label(&self) -> bool {
        self.label.starts_with('"')
    }

    /// Returns `true` if the label is the timetable placeholder sentinel.
    #[inline]
    #[must_use]
    pub fn is_timetable_slot(&self) -> bool {
        self.label == "timeTableContent"
    }
}
