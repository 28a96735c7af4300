//! Structure-preserving serialization back to table-literal text.
//!
//! The writer reconstructs a spec document from the parsed entry sequence
//! plus a validated value list of the same length: containers reopen as
//! `label={`, leaves render as `label=value,` (with the two label-shape
//! special cases of the dialect), and closing braces are synthesized from
//! the depth profile.
//!
//! Serialization is refused outright when the value list does not pass
//! validation; the caller must fix the values and re-validate first.
//!
//! ## Examples
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let doc = schema_from_str(r#"p={v={type="Double",default=1.0}}"#).unwrap();
//! let text = doc.write_values(&["", "2.5"]).unwrap();
//! assert_eq!(text, "p={\n\tv=2.5,\n}");
//! ```

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::validate::validate_entries;

/// Configuration for the table-literal writer.
///
/// # Examples
///
/// ```rust
/// use luatab::WriteOptions;
///
/// // Default: one tab per nesting level.
/// let options = WriteOptions::new();
/// assert_eq!(options.indent, "\t");
///
/// // Four-space indentation instead.
/// let options = WriteOptions::new().with_indent("    ");
/// ```
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// The string emitted once per nesting level.
    pub indent: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: "\t".to_string(),
        }
    }
}

impl WriteOptions {
    /// Creates the default options (tab indentation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent unit emitted per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }
}

/// Renders the entry sequence with the supplied values.
///
/// Validates first; any violation refuses serialization with
/// [`Error::InvalidSpec`] and produces no output.
pub(crate) fn write_document(
    entries: &[Entry],
    values: &[&str],
    options: &WriteOptions,
) -> Result<String> {
    let report = validate_entries(entries, values)?;
    if !report.is_valid() {
        return Err(Error::InvalidSpec { report });
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        push_indent(&mut out, options, entry.indent);
        if entry.is_container() {
            out.push_str(&entry.label);
            out.push_str("={\n");
        } else if entry.has_quoted_label() {
            out.push_str(&format!("[{}]={},\n", entry.label, values[i]));
        } else if entry.is_timetable_slot() {
            out.push_str(&format!("{},\n", values[i]));
        } else {
            out.push_str(&format!("{}={},\n", entry.label, values[i]));
        }

        // Close every table left open when the depth drops.
        if let Some(next) = entries.get(i + 1) {
            if entry.indent > next.indent {
                for level in (next.indent..entry.indent).rev() {
                    push_indent(&mut out, options, level);
                    out.push_str("},\n");
                }
            }
        }
    }

    if let Some(last) = entries.last() {
        for level in (1..last.indent).rev() {
            push_indent(&mut out, options, level);
            out.push_str("},\n");
        }
        out.push('}');
    }
    Ok(out)
}

fn push_indent(out: &mut String, options: &WriteOptions, level: u8) {
    for _ in 0..level {
        out.push_str(&options.indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaDoc;

    #[test]
    fn test_leaf_and_container_rendering() {
        let doc = SchemaDoc::parse(
            r#"p={a={type="Integer",default=1},nested={b={type="Boolean",default="true"}}}"#,
        )
        .unwrap();
        let text = doc.write_values(&["", "3", "", "false"]).unwrap();
        assert_eq!(text, "p={\n\ta=3,\n\tnested={\n\t\tb=false,\n\t},\n}");
    }

    #[test]
    fn test_quoted_label_and_timetable_shapes() {
        let doc = SchemaDoc::parse(
            r#"p={g={type="String[]",default="A",tableContent={values={"A"}}},t={type="Double",default=0.0,timeTableContent={numberEntries=0}}}"#,
        )
        .unwrap();
        let text = doc
            .write_values(&["", "", "{\"A\"}", "", "{0,1}"])
            .unwrap();
        assert_eq!(
            text,
            "p={\n\tg={\n\t\t[\"A\"]={\"A\"},\n\t},\n\tt={\n\t\t{0,1},\n\t},\n}"
        );
    }

    #[test]
    fn test_refused_on_invalid_values() {
        let doc = SchemaDoc::parse(r#"p={v={type="Integer",default=1,range={1,10}}}"#).unwrap();
        let err = doc.write_values(&["", "99"]).unwrap_err();
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn test_depth_balance() {
        let doc = SchemaDoc::parse(
            r#"a={b={c={type="Integer",default=1},d={type="Integer",default=2}},e={type="Integer",default=3}}"#,
        )
        .unwrap();
        let text = doc.write_values(&["", "", "1", "2", "3"]).unwrap();
        // every opened table is closed exactly once
        let containers = doc.entries().iter().filter(|e| e.is_container()).count();
        assert_eq!(text.matches('}').count(), containers);
        assert!(text.ends_with('}'));
    }

    #[test]
    fn test_custom_indent() {
        let doc = SchemaDoc::parse(r#"p={v={type="Integer",default=1}}"#).unwrap();
        let options = WriteOptions::new().with_indent("  ");
        let text = doc.write_values_with_options(&["", "4"], &options).unwrap();
        assert_eq!(text, "p={\n  v=4,\n}");
    }

    #[test]
    fn test_empty_document() {
        let doc = SchemaDoc::parse("").unwrap();
        assert_eq!(doc.write_values(&[]).unwrap(), "");
    }
}
