//! Error types for table-literal parsing, validation and serialization.
//!
//! This module provides the crate-wide [`Error`] enum and [`Result`] alias.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: a source file is missing or unreadable; no downstream
//!   stage runs
//! - **Syntax Errors**: malformed literal text (unterminated strings,
//!   unbalanced braces, values outside a table entry)
//! - **Axis Queue Exhaustion**: an output descriptor declares more
//!   `filename=` leaves than x-axis blocks
//! - **Length Mismatch**: a value list does not line up one-to-one with the
//!   parsed entry sequence
//! - **Invalid Spec**: serialization was requested for a value set that did
//!   not pass validation; the full [`Report`](crate::Report) rides along
//!
//! ## Examples
//!
//! ```rust
//! use luatab::{schema_from_str, Error};
//!
//! let result = schema_from_str("broken={");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use crate::validate::Report;
use thiserror::Error;

/// Represents all possible errors raised while parsing, validating or
/// serializing table-literal documents.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while loading a source file
    #[error("IO error reading {path}: {msg}")]
    Io { path: String, msg: String },

    /// Malformed literal text at a byte offset of the stripped source
    #[error("Syntax error at offset {pos}: {msg}")]
    Syntax { pos: usize, msg: String },

    /// More `filename=` leaves than declared x-axis blocks
    #[error("x-axis queue exhausted at filename \"{filename}\"")]
    AxisQueueExhausted { filename: String },

    /// A value list and the entry sequence are not the same length
    #[error("value count mismatch: {expected} entries, {found} values")]
    LengthMismatch { expected: usize, found: usize },

    /// Serialization refused because the value set failed validation
    #[error("cannot serialize: {} validation error(s)", .report.violations().len())]
    InvalidSpec { report: Report },
}

impl Error {
    /// Creates an I/O error for a file that could not be read.
    pub fn io(path: &str, msg: &str) -> Self {
        Error::Io {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a syntax error at a byte offset of the stripped source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luatab::Error;
    ///
    /// let err = Error::syntax(12, "unbalanced closing brace");
    /// assert!(err.to_string().contains("offset 12"));
    /// ```
    pub fn syntax(pos: usize, msg: &str) -> Self {
        Error::Syntax {
            pos,
            msg: msg.to_string(),
        }
    }

    /// Creates a length-mismatch error for a misaligned value list.
    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Error::LengthMismatch { expected, found }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
