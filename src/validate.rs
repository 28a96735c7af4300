//! Type and range validation of spec values against a parsed schema.
//!
//! The validator takes the schema's entry sequence and a value list of the
//! same length (one value string per entry, positionally aligned) and
//! checks every value against its entry's declared type and range. All
//! violations are accumulated before returning; the consuming UI displays
//! every error at once, so there is no short-circuit.
//!
//! Violations are data, not errors: only a misaligned value list turns
//! into an `Err` (see [`crate::Error::LengthMismatch`]).
//!
//! ## Examples
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let doc = schema_from_str(
//!     r#"p={n={type="Integer",default=5,range={1,10}}}"#,
//! ).unwrap();
//!
//! let report = doc.validate_values(&["", "15"]).unwrap();
//! assert!(!report.is_valid());
//! assert_eq!(report.indices(), vec![1]);
//! assert!(report.message().contains("Range ERROR"));
//! ```

use crate::entry::{Entry, ParamType};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static IS_BOOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:true|false)$").unwrap());
static IS_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"[A-Za-z0-9_.]+"$"#).unwrap());
static IS_STRING_ARR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\{"[A-Za-z0-9_]+"\}$"#).unwrap());
static IS_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9*]+$").unwrap());
static IS_INT_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{[0-9*]+,[0-9*]+\}$").unwrap());
static IS_DOUBLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9E.*\-]+$").unwrap());
static IS_DOUBLE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{[0-9E.*\-]+,[0-9E.*\-]+\}$").unwrap());

/// One validation failure: the entry index it occurred at and the
/// human-readable message line describing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub index: usize,
    pub message: String,
}

/// The outcome of validating a value list against a schema.
///
/// Carries every violation found, in entry order. An empty report means
/// the value set is valid and may be serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    /// Returns `true` if no violations were found.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, in entry order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The indices of the offending entries, parallel to the message lines.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.violations.iter().map(|v| v.index).collect()
    }

    /// The full message text, one line per violation, trailing newline
    /// included (the tree-view UI appends it verbatim).
    #[must_use]
    pub fn message(&self) -> String {
        let mut out = String::new();
        for v in &self.violations {
            out.push_str(&v.message);
            out.push('\n');
        }
        out
    }

    fn push(&mut self, index: usize, message: String) {
        self.violations.push(Violation { index, message });
    }
}

/// Checks each value against its entry's declared type and range.
///
/// `values` must hold exactly one string per entry. Entries with an empty
/// or unrecognised type declaration are skipped, never flagged.
pub(crate) fn validate_entries(entries: &[Entry], values: &[&str]) -> Result<Report> {
    if values.len() != entries.len() {
        return Err(Error::length_mismatch(entries.len(), values.len()));
    }

    let mut report = Report::default();
    for (i, (entry, value)) in entries.iter().zip(values).enumerate() {
        let Some(ty) = entry.param_type() else {
            continue;
        };
        match ty {
            ParamType::Boolean => {
                if !IS_BOOL.is_match(value) {
                    report.push(i, type_error(entry));
                }
            }
            ParamType::String => {
                if !IS_STRING.is_match(value) {
                    report.push(i, type_error(entry));
                }
            }
            ParamType::StringArray => {
                if !IS_STRING_ARR.is_match(value) {
                    report.push(i, type_error(entry));
                }
            }
            ParamType::Integer => {
                if !IS_INT.is_match(value) && !IS_INT_PAIR.is_match(value) {
                    report.push(i, type_error(entry));
                }
                if let Some(range) = &entry.range {
                    // Wildcards and timestamp pairs are exempt; only a
                    // plain integer is range-checked.
                    if IS_INT.is_match(value) {
                        if let (Ok(v), Ok(lo), Ok(hi)) = (
                            value.parse::<i64>(),
                            range.min.parse::<i64>(),
                            range.max.parse::<i64>(),
                        ) {
                            if v < lo || v > hi {
                                report.push(i, range_error(entry, &range.min, &range.max));
                            }
                        }
                    }
                }
            }
            ParamType::Double => {
                if !IS_DOUBLE.is_match(value) && !IS_DOUBLE_PAIR.is_match(value) {
                    report.push(i, type_error(entry));
                }
                if let Some(range) = &entry.range {
                    if IS_DOUBLE.is_match(value) {
                        if let (Ok(v), Ok(lo), Ok(hi)) = (
                            value.parse::<f64>(),
                            range.min.parse::<f64>(),
                            range.max.parse::<f64>(),
                        ) {
                            if v < lo || v > hi {
                                report.push(i, range_error(entry, &range.min, &range.max));
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(report)
}

fn type_error(entry: &Entry) -> String {
    format!(
        "Type ERROR: \"{}\" should be of type {}",
        entry.label, entry.ty
    )
}

fn range_error(entry: &Entry, min: &str, max: &str) -> String {
    format!(
        "Range ERROR: {} should be in Range {{{},{}}}",
        entry.label, min, max
    )
}
