//! Source loading and comment stripping.
//!
//! Table-literal documents are line-oriented Lua files carrying `--`
//! comments and free-form whitespace. The readers operate on a single
//! concatenated, comment-free, whitespace-free string; this module is the
//! preprocessor that produces it.
//!
//! ## Examples
//!
//! ```rust
//! use luatab::strip_source;
//!
//! let text = "-- output description\nkeys = {\n  file1 = { -- trailing\n";
//! assert_eq!(strip_source(text), "keys={file1={");
//! ```

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Strips whitespace and `--` comments from table-literal source text and
/// concatenates the remaining lines into one string.
///
/// Per line: all whitespace is removed first; a line that then starts with
/// `--` is dropped entirely, and a trailing `--` comment is truncated.
#[must_use]
pub fn strip_source(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() || compact.starts_with("--") {
            continue;
        }
        match compact.find("--") {
            Some(pos) => out.push_str(&compact[..pos]),
            None => out.push_str(&compact),
        }
    }
    out
}

/// Reads a UTF-8 source file and applies [`strip_source`].
///
/// # Errors
///
/// Returns [`Error::Io`] when the file is missing or unreadable; no
/// downstream parsing stage runs in that case.
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(&path.display().to_string(), &e.to_string()))?;
    Ok(strip_source(&text))
}
