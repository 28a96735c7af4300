//! Table-Literal Dialect Reference
//!
//! This module documents the restricted Lua-table-literal dialect the
//! crate parses, as implemented by this library.
//!
//! # Overview
//!
//! Simulation front-ends describe two kinds of documents in the same
//! surface syntax:
//!
//! - **Output descriptors**: which data files a run produces, which column
//!   holds the x-axis, and which columns hold the plottable series.
//! - **Vali/spec pairs**: a *vali* document declaring the parameter tree
//!   (types, defaults, ranges) and a *spec* document carrying the actual
//!   values, aligned position-for-position with the vali tree.
//!
//! The syntax is a small subset of Lua table constructors. It is *not*
//! Lua: there are no expressions, no functions, and no nesting beyond
//! tables of tables and scalars.
//!
//! # Core Syntax
//!
//! ## Assignments
//!
//! ```text
//! key={...}        -- nested table
//! key="text"       -- quoted string
//! key=3.5          -- number (integer, decimal or scientific E notation)
//! key={"a","b"}    -- string array
//! key={0.5,1.2}    -- numeric 2-tuple (timestamp pair)
//! ```
//!
//! `--` starts a comment that runs to the end of the line; whitespace is
//! insignificant everywhere. The preprocessor removes both before any
//! parsing happens (see [`crate::strip_source`]).
//!
//! # Output-Descriptor Dialect
//!
//! ```text
//! outputFiles={
//!     reactor={
//!         filename="reactor.dat",
//!         x={time={unit="s",col=1}},
//!         y={
//!             volume={col=2,unit="m^3"},
//!             mass={col=3,unit="kg"},
//!         },
//!     },
//! }
//! ```
//!
//! **Rules**:
//! - `keys={` and `outputFiles={` are transparent wrappers.
//! - Every `x={NAME={unit="U",col=N}}` block declares the x-axis of the
//!   *next* `filename=` leaf, in strict declaration order. There must be
//!   at least as many x blocks as `filename=` leaves.
//! - A `y={...}` block folds its series under the enclosing file entry,
//!   which becomes the expandable tree node.
//! - Column numbers are declared 1-based in the file and stored 0-based
//!   everywhere in this crate (`declared − 1`).
//!
//! # Vali Dialect
//!
//! ```text
//! fermenter={
//!     volume={
//!         type="Double",
//!         default=1.0,
//!         range={values={0.5,2.5}},
//!     },
//!     gases={
//!         type="String[]",
//!         default="CH4",
//!         tableContent={values={"CH4","CO2"}},
//!     },
//!     feeding={
//!         type="Double",
//!         default=0.0,
//!         timeTableContent={numberEntries=2},
//!     },
//! }
//! ```
//!
//! **Declared types**:
//!
//! | Type | Valid value text | Example |
//! |------|------------------|---------|
//! | `Boolean` | `true` or `false` | `true` |
//! | `Double` | decimal/scientific, `*` wildcard, or 2-tuple | `5E-1`, `*`, `{0,1.5}` |
//! | `Integer` | digits, `*` wildcard, or 2-tuple | `42`, `{0,3}` |
//! | `String` | double-quoted word token | `"LU"` |
//! | `String[]` | brace-enclosed quoted token | `{"CH4"}` |
//!
//! **Rules**:
//! - `range={a,b}`, `range={values={a,b}}` and `range={min=a,max=b}` are
//!   equivalent; the bounds apply inclusively to plain Double/Integer
//!   values (tuples and wildcards are exempt).
//! - `tableContent={values={...}}` materialises one tree slot per element;
//!   the slots inherit the surrounding `type=`/`default=`.
//! - `timeTableContent={numberEntries=N}` materialises N+1 slots (one
//!   extra for the header row), also inheriting type and default.
//!
//! # Spec Dialect
//!
//! The spec document repeats the vali tree shape with values in place of
//! declarations:
//!
//! ```text
//! fermenter={
//!     volume=2.0,
//!     gases={"CH4","CO2"},
//!     feeding={
//!         {0,0},
//!         {0.5,1.2},
//!         {1.0,0.8},
//!     },
//! }
//! ```
//!
//! Flattened positionally, every table, element and tuple occupies exactly
//! one slot, and the slot sequence must line up one-to-one with the vali
//! entry sequence. Numeric 2-tuples and single-element string arrays
//! collapse to one slot each; multi-element string arrays occupy one slot
//! per element plus one for the enclosing key.
//!
//! # UI Text Formats
//!
//! The crate reproduces the plain-text tables the tree-view/plot UI
//! consumes verbatim:
//!
//! ```text
//! tree_text:     LABEL INDENT GLYPH
//! values_text:   LABEL UNIT COL FILENAME XCOL XNAME XUNIT
//! display_text:  INDENT GLYPH LABEL TYPE DEFAULT
//! ```
//!
//! Glyph codes: `0` plain leaf, `15` expandable container, `37` plot
//! series row.
//!
//! # Limitations
//!
//! - Keys are word tokens (`[A-Za-z0-9_]`), quoted strings, or the
//!   serialized `["..."]` form; no other key syntax is accepted.
//! - Strings carry no escape sequences.
//! - Validation knows exactly the five types above; anything else is
//!   skipped silently.

// This module contains only documentation; no implementation code
