//! The output-descriptor dialect reader.
//!
//! An output descriptor lists the data files a simulation produces: for
//! every file, the x-axis column the series are plotted against and, under
//! `y={...}`, the individual data series with their columns and units. The
//! reader flattens this into the entry arena plus the two plain-text
//! tables the plot UI consumes.
//!
//! ## Parsing model
//!
//! `keys={` and `outputFiles={` wrappers are transparent. Every other
//! `name={` group pushes a series row (`indent=1`, glyph 37), except
//! `y={`, which instead rewrites the previous arena slot in place to
//! `indent=0` / glyph 15, folding the y-series block under its x-series
//! parent. x-axis blocks (`x={NAME={unit="U",col=N}}`) never surface as
//! entries; they are queued in declaration order and consumed strictly
//! FIFO, one triple per `filename=` leaf.
//!
//! All declared column numbers are stored 0-based (`declared − 1`) the
//! moment they are read.
//!
//! ## Examples
//!
//! ```rust
//! use luatab::output_from_str;
//!
//! let src = r#"
//! outputFiles={
//!     reactor={
//!         filename="reactor.dat",
//!         x={time={unit="s",col=1}},
//!         y={
//!             volume={col=2,unit="m^3"},
//!         },
//!     },
//! }
//! "#;
//! let doc = output_from_str(src).unwrap();
//! assert_eq!(doc.tree_text(), "reactor 0 15\nvolume 1 37");
//! assert_eq!(doc.entries()[1].col, Some(1));
//! assert_eq!(doc.entries()[1].x_col, Some(0));
//! ```

use crate::entry::{Entry, Glyph};
use crate::error::{Error, Result};
use crate::input::{load_source, strip_source};
use crate::lexer::{tokenize, Cursor, Tok, TokKind};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// A parsed output descriptor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDoc {
    entries: Vec<Entry>,
}

/// One queued x-axis declaration, column already 0-based.
#[derive(Clone, Debug)]
struct AxisDecl {
    name: String,
    unit: String,
    col: i64,
}

/// Carry-forward state threaded through the walk: the file and x-axis
/// context that later `col=`/`unit=` lines attach to.
#[derive(Clone, Debug, Default)]
struct OutputContext {
    filename: String,
    x_name: String,
    x_unit: String,
    x_col: Option<i64>,
}

impl OutputDoc {
    /// Parses an output descriptor from raw source text (comments and
    /// whitespace are stripped first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] on malformed literal text and
    /// [`Error::AxisQueueExhausted`] when a `filename=` leaf has no
    /// matching x-axis block left in the queue.
    pub fn parse(source: &str) -> Result<Self> {
        let stripped = strip_source(source);
        let toks = tokenize(&stripped)?;
        // The x-axis queue is populated by a full pre-pass: a filename=
        // leaf may precede its x block in the text.
        let (rest, queue) = extract_axis_blocks(&toks)?;
        let mut parser = OutputParser {
            queue,
            ..OutputParser::default()
        };
        parser.items(&mut Cursor::new(&rest))?;
        Ok(OutputDoc {
            entries: parser.entries,
        })
    }

    /// Loads and parses an output descriptor from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let stripped = load_source(path)?;
        Self::parse(&stripped)
    }

    /// The parsed entry sequence, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the descriptor declared no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The tree-view text consumed by the plot UI, one line per entry:
    /// `LABEL INDENT GLYPH` (no trailing newline).
    #[must_use]
    pub fn tree_text(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} {} {}", e.label, e.indent, e.glyph))
            .collect();
        lines.join("\n")
    }

    /// The value table consumed by the plot UI, one line per entry:
    /// `LABEL UNIT COL FILENAME XCOL XNAME XUNIT` (no trailing newline;
    /// absent numeric cells render empty).
    #[must_use]
    pub fn values_text(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{} {} {} {} {} {} {}",
                    e.label,
                    e.unit,
                    opt_col(e.col),
                    e.filename,
                    opt_col(e.x_col),
                    e.x_name,
                    e.x_unit
                )
            })
            .collect();
        lines.join("\n")
    }
}

fn opt_col(col: Option<i64>) -> String {
    col.map(|c| c.to_string()).unwrap_or_default()
}

#[derive(Default)]
struct OutputParser {
    entries: Vec<Entry>,
    queue: VecDeque<AxisDecl>,
    ctx: OutputContext,
}

impl OutputParser {
    fn items(&mut self, cur: &mut Cursor) -> Result<()> {
        while let Some(t) = cur.peek() {
            match &t.kind {
                TokKind::Comma => {
                    cur.next();
                }
                TokKind::LBrace => {
                    // Keyless group: descend transparently.
                    let group = cur.collect_group()?;
                    self.items(&mut Cursor::new(&group))?;
                }
                TokKind::Quoted(_) | TokKind::Atom(_) => {
                    if matches!(cur.peek_second(), Some(TokKind::Eq)) {
                        self.item(cur)?;
                    } else {
                        cur.next();
                    }
                }
                TokKind::RBrace => {
                    return Err(Error::syntax(t.pos, "unbalanced closing brace"));
                }
                _ => {
                    return Err(Error::syntax(t.pos, "unexpected token"));
                }
            }
        }
        Ok(())
    }

    fn item(&mut self, cur: &mut Cursor) -> Result<()> {
        let key_raw = match cur.next() {
            Some(t) => t.kind.text().to_string(),
            None => return Err(Error::syntax(cur.pos(), "expected key")),
        };
        cur.next(); // '=' checked by the caller

        match cur.peek().map(|t| t.kind.clone()) {
            Some(TokKind::LBrace) => {
                let pos = cur.pos();
                let group = cur.collect_group()?;
                match key_raw.as_str() {
                    // Wrappers carry no tree information of their own.
                    "keys" | "outputFiles" => self.items(&mut Cursor::new(&group)),
                    "y" => {
                        // The y-series block folds under its x-series
                        // parent: the previous slot becomes the expandable
                        // node and the series inside stay its children.
                        match self.entries.last_mut() {
                            Some(prev) => {
                                prev.indent = 0;
                                prev.glyph = Glyph::Expandable;
                            }
                            None => {
                                return Err(Error::syntax(
                                    pos,
                                    "y-series block outside a series table",
                                ))
                            }
                        }
                        self.items(&mut Cursor::new(&group))
                    }
                    _ => {
                        let mut e = Entry::new(&key_raw, 1, Glyph::Series);
                        e.filename = self.ctx.filename.clone();
                        self.entries.push(e);
                        self.items(&mut Cursor::new(&group))
                    }
                }
            }
            Some(TokKind::Quoted(_)) | Some(TokKind::Atom(_)) => {
                let pos = cur.pos();
                let val = match cur.next() {
                    Some(t) => t.kind.clone(),
                    None => return Err(Error::syntax(cur.pos(), "expected value")),
                };
                match key_raw.as_str() {
                    "filename" => self.filename_field(val.unquoted(), pos),
                    "col" => self.col_field(val.unquoted(), pos),
                    "unit" => {
                        if let Some(e) = self.entries.last_mut() {
                            e.unit = val.unquoted().to_string();
                        }
                        Ok(())
                    }
                    _ => Ok(()),
                }
            }
            _ => Err(Error::syntax(cur.pos(), "expected value after '='")),
        }
    }

    /// A `filename=` leaf claims the current series row, resets its column
    /// baseline and consumes the next queued x-axis declaration.
    fn filename_field(&mut self, name: &str, pos: usize) -> Result<()> {
        let axis = self
            .queue
            .pop_front()
            .ok_or_else(|| Error::AxisQueueExhausted {
                filename: name.to_string(),
            })?;

        let entry = self
            .entries
            .last_mut()
            .ok_or_else(|| Error::syntax(pos, "filename outside a series table"))?;
        entry.filename = name.to_string();
        entry.col = None;
        entry.unit.clear();
        entry.x_col = Some(axis.col);
        entry.x_name = axis.name.clone();
        entry.x_unit = axis.unit.clone();

        self.ctx.filename = name.to_string();
        self.ctx.x_col = Some(axis.col);
        self.ctx.x_name = axis.name;
        self.ctx.x_unit = axis.unit;
        Ok(())
    }

    fn col_field(&mut self, value: &str, pos: usize) -> Result<()> {
        let declared: i64 = value
            .parse()
            .map_err(|_| Error::syntax(pos, "invalid column number"))?;
        let entry = self
            .entries
            .last_mut()
            .ok_or_else(|| Error::syntax(pos, "col outside a series table"))?;
        entry.col = Some(declared - 1);
        entry.x_col = self.ctx.x_col;
        entry.x_name = self.ctx.x_name.clone();
        entry.x_unit = self.ctx.x_unit.clone();
        Ok(())
    }

}

/// Pre-pass over the token stream: every `x={NAME={unit="U",col=N}}`
/// block is recorded as `(name, unit, N-1)` in encounter order and
/// removed, so it never reappears as an ordinary key. Returns the
/// remaining tokens and the filled queue.
fn extract_axis_blocks(toks: &[Tok]) -> Result<(Vec<Tok>, VecDeque<AxisDecl>)> {
    let mut rest = Vec::new();
    let mut queue = VecDeque::new();
    let mut i = 0;

    while i < toks.len() {
        // Only the canonical shape x={NAME={unit=... is an axis block; an
        // ordinary series that happens to be named x stays a series.
        let is_axis_open = matches!(&toks[i].kind, TokKind::Atom(a) if a == "x")
            && matches!(toks.get(i + 1).map(|t| &t.kind), Some(TokKind::Eq))
            && matches!(toks.get(i + 2).map(|t| &t.kind), Some(TokKind::LBrace))
            && matches!(toks.get(i + 3).map(|t| &t.kind), Some(TokKind::Atom(_)))
            && matches!(toks.get(i + 4).map(|t| &t.kind), Some(TokKind::Eq))
            && matches!(toks.get(i + 5).map(|t| &t.kind), Some(TokKind::LBrace))
            && matches!(toks.get(i + 6).map(|t| &t.kind), Some(TokKind::Atom(a)) if a == "unit");
        if !is_axis_open {
            rest.push(toks[i].clone());
            i += 1;
            continue;
        }

        let pos = toks[i].pos;
        let mut depth = 0usize;
        let mut end = None;
        for (j, t) in toks.iter().enumerate().skip(i + 2) {
            match t.kind {
                TokKind::LBrace => depth += 1,
                TokKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(j);
                        break;
                    }
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| Error::syntax(pos, "unbalanced x-axis block"))?;
        queue.push_back(parse_axis_block(&toks[i + 3..end], pos)?);
        i = end + 1;
    }

    Ok((rest, queue))
}

/// Reads `NAME={unit="U",col=N}` out of a stripped x-axis group.
fn parse_axis_block(group: &[Tok], pos: usize) -> Result<AxisDecl> {
    let name = match group.first().map(|t| &t.kind) {
        Some(TokKind::Atom(n)) => n.clone(),
        _ => return Err(Error::syntax(pos, "malformed x-axis block: missing name")),
    };
    if !matches!(group.get(1).map(|t| &t.kind), Some(TokKind::Eq)) {
        return Err(Error::syntax(pos, "malformed x-axis block"));
    }

    let mut unit = None;
    let mut col = None;
    let mut i = 2;
    while i < group.len() {
        if let TokKind::Atom(key) = &group[i].kind {
            if matches!(group.get(i + 1).map(|t| &t.kind), Some(TokKind::Eq)) {
                match (key.as_str(), group.get(i + 2).map(|t| &t.kind)) {
                    ("unit", Some(k @ TokKind::Quoted(_))) => {
                        unit = Some(k.unquoted().to_string());
                        i += 3;
                        continue;
                    }
                    ("col", Some(TokKind::Atom(v))) => {
                        let declared: i64 = v
                            .parse()
                            .map_err(|_| Error::syntax(pos, "invalid x-axis column"))?;
                        col = Some(declared - 1);
                        i += 3;
                        continue;
                    }
                    _ => {}
                }
            }
        }
        i += 1;
    }

    match (unit, col) {
        (Some(unit), Some(col)) => Ok(AxisDecl { name, unit, col }),
        _ => Err(Error::syntax(pos, "malformed x-axis block: missing unit or col")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
    -- simulation output description
    outputFiles={
        reactor={
            filename="reactor.dat",
            x={time={unit="s",col=1}},
            y={
                volume={col=2,unit="m^3"},
                mass={col=3,unit="kg"},
            },
        },
        gas={
            filename="gas.dat",
            x={hour={unit="h",col=3}},
            y={
                methane={col=5,unit="%"},
            },
        },
    }
    "#;

    #[test]
    fn test_tree_layout() {
        let doc = OutputDoc::parse(DESCRIPTOR).unwrap();
        assert_eq!(
            doc.tree_text(),
            "reactor 0 15\nvolume 1 37\nmass 1 37\ngas 0 15\nmethane 1 37"
        );
    }

    #[test]
    fn test_columns_are_zero_based() {
        let doc = OutputDoc::parse(DESCRIPTOR).unwrap();
        let volume = &doc.entries()[1];
        assert_eq!(volume.col, Some(1));
        assert_eq!(volume.x_col, Some(0));
        let methane = &doc.entries()[4];
        assert_eq!(methane.col, Some(4));
        assert_eq!(methane.x_col, Some(2));
    }

    #[test]
    fn test_axis_context_carries_forward() {
        let doc = OutputDoc::parse(DESCRIPTOR).unwrap();
        let mass = &doc.entries()[2];
        assert_eq!(mass.filename, "reactor.dat");
        assert_eq!(mass.x_name, "time");
        assert_eq!(mass.x_unit, "s");
        let methane = &doc.entries()[4];
        assert_eq!(methane.filename, "gas.dat");
        assert_eq!(methane.x_name, "hour");
        assert_eq!(methane.x_unit, "h");
    }

    #[test]
    fn test_values_table() {
        let doc = OutputDoc::parse(DESCRIPTOR).unwrap();
        let values_text = doc.values_text();
        let lines: Vec<&str> = values_text.lines().collect();
        assert_eq!(lines[0], "reactor   reactor.dat 0 time s");
        assert_eq!(lines[1], "volume m^3 1 reactor.dat 0 time s");
        assert_eq!(lines[4], "methane % 4 gas.dat 2 hour h");
    }

    #[test]
    fn test_queue_exhaustion_is_fatal() {
        let src = r#"
        outputFiles={
            reactor={
                filename="reactor.dat",
                y={volume={col=2,unit="m^3"}},
            },
        }
        "#;
        let err = OutputDoc::parse(src).unwrap_err();
        assert!(matches!(err, Error::AxisQueueExhausted { .. }));
    }

    #[test]
    fn test_malformed_axis_block() {
        let src = r#"outputFiles={r={filename="r.dat",x={time={unit="s"}}}}"#;
        assert!(OutputDoc::parse(src).is_err());
    }
}
