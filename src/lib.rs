//! # luatab
//!
//! A parser, validator and serializer for the restricted Lua-table-literal
//! dialect used by simulation spec and output-descriptor files.
//!
//! ## What does it parse?
//!
//! Simulation front-ends describe their configuration in a small subset of
//! Lua table constructors: nested `key={...}` assignments, quoted
//! strings, numbers, string arrays and numeric 2-tuples. Two dialects
//! share that surface syntax:
//!
//! - **Output descriptors** list the data files a run produces, the
//!   x-axis column of each file and the plottable series under `y={...}`.
//! - **Vali/spec pairs** declare a parameter tree with types, defaults and
//!   ranges (the *vali* document) and carry the matching values (the
//!   *spec* document), aligned position-for-position.
//!
//! Both flatten into one shared model: an ordered sequence of
//! [`Entry`] values addressed purely by position. The validator checks a
//! value list against the declared types/ranges, and the writer
//! reconstructs syntactically valid table-literal text from the tree plus
//! a validated value list.
//!
//! See [`format`] for the full dialect reference.
//!
//! ## Quick Start
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let vali = r#"
//! reactor={
//!     volume={type="Double",default=1.0,range={0.5,2.5}},
//!     stirred={type="Boolean",default="true"},
//! }
//! "#;
//!
//! let doc = schema_from_str(vali).unwrap();
//! assert_eq!(doc.len(), 3);
//!
//! // One value per entry, positionally aligned with the tree.
//! let report = doc.validate_values(&["", "2.0", "true"]).unwrap();
//! assert!(report.is_valid());
//!
//! // Round-trip the values back into table-literal text.
//! let text = doc.write_values(&["", "2.0", "true"]).unwrap();
//! assert_eq!(text, "reactor={\n\tvolume=2.0,\n\tstirred=true,\n}");
//! ```
//!
//! ## Validating and Reporting
//!
//! Validation never aborts on the first problem; the consuming UI shows
//! every violation at once:
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let doc = schema_from_str(
//!     r#"p={n={type="Integer",default=5,range={1,10}}}"#,
//! ).unwrap();
//!
//! let report = doc.validate_values(&["", "15"]).unwrap();
//! assert_eq!(report.indices(), vec![1]);
//! assert_eq!(report.message(), "Range ERROR: n should be in Range {1,10}\n");
//! ```
//!
//! ## Output Descriptors
//!
//! ```rust
//! use luatab::output_from_str;
//!
//! let doc = output_from_str(r#"
//! outputFiles={
//!     reactor={
//!         filename="reactor.dat",
//!         x={time={unit="s",col=1}},
//!         y={volume={col=2,unit="m^3"}},
//!     },
//! }
//! "#).unwrap();
//!
//! assert_eq!(doc.tree_text(), "reactor 0 15\nvolume 1 37");
//! assert_eq!(doc.values_text(),
//!     "reactor   reactor.dat 0 time s\nvolume m^3 1 reactor.dat 0 time s");
//! ```
//!
//! ## Design Notes
//!
//! - **Single-pass tokenizer**: the preprocessed source is scanned once
//!   into a token stream; the dialect readers are recursive-descent
//!   parsers over that stream. No repeated text rewriting.
//! - **Positional contract**: value lists must align one-to-one with the
//!   entry sequence; any mismatch is an explicit
//!   [`Error::LengthMismatch`], never a silent misread.
//! - **Errors as data**: validation violations come back as a [`Report`];
//!   only structural problems (I/O, syntax, queue exhaustion, length
//!   mismatch, refused serialization) are `Err`.
//! - **No unsafe code**, no panics in the public API.

pub mod entry;
pub mod error;
pub mod format;
pub mod input;
pub mod lexer;
pub mod output;
pub mod schema;
pub mod ser;
pub mod validate;

pub use entry::{Entry, Glyph, ParamType, RangeDecl};
pub use error::{Error, Result};
pub use input::{load_source, strip_source};
pub use output::OutputDoc;
pub use schema::SchemaDoc;
pub use ser::WriteOptions;
pub use validate::{Report, Violation};

use std::path::Path;

/// Parses an output descriptor from source text.
///
/// Comments and whitespace are stripped first, so raw file contents can be
/// passed directly.
///
/// # Examples
///
/// ```rust
/// use luatab::output_from_str;
///
/// let doc = output_from_str(r#"
/// outputFiles={
///     gas={
///         filename="gas.dat", -- hourly averages
///         x={hour={unit="h",col=1}},
///         y={methane={col=2,unit="%"}},
///     },
/// }
/// "#).unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
///
/// # Errors
///
/// Returns an error on malformed literal text or when the x-axis queue
/// runs out before the last `filename=` leaf.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn output_from_str(source: &str) -> Result<OutputDoc> {
    OutputDoc::parse(source)
}

/// Loads and parses an output descriptor from a file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file is missing or unreadable; no
/// parsing stage runs in that case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn output_from_path<P: AsRef<Path>>(path: P) -> Result<OutputDoc> {
    OutputDoc::from_path(path)
}

/// Parses a vali (schema) document from source text.
///
/// Comments and whitespace are stripped first, so raw file contents can be
/// passed directly.
///
/// # Examples
///
/// ```rust
/// use luatab::schema_from_str;
///
/// let doc = schema_from_str(
///     r#"p={solver={type="String",default="LU"}}"#,
/// ).unwrap();
/// assert_eq!(doc.display_text(), "0 15 p  \n1 0 solver String LU");
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] on malformed literal text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn schema_from_str(source: &str) -> Result<SchemaDoc> {
    SchemaDoc::parse(source)
}

/// Loads and parses a vali (schema) document from a file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file is missing or unreadable.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn schema_from_path<P: AsRef<Path>>(path: P) -> Result<SchemaDoc> {
    SchemaDoc::from_path(path)
}
