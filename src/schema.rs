//! The schema ("vali") dialect reader and the positional spec-value loader.
//!
//! A vali document declares the parameter tree of a simulation: nested
//! tables whose leaves carry `type=`, `default=` and optional `range=`
//! clauses. A spec document carries the matching values, one per entry
//! position. [`SchemaDoc`] parses the former, aligns the latter, and hands
//! both to the validator and the writer.
//!
//! ## Parsing model
//!
//! The token stream is walked once by a recursive-descent parser with an
//! explicit inheritance context. Three literal forms describe
//! variable-length tables and are expanded in place:
//!
//! - `range={a,b}` / `range={values={a,b}}` / `range={min=a,max=b}`
//!   collapse to a range declaration on the owning entry (no entries),
//! - `tableContent={values={"a","b"}}` expands to one quoted placeholder
//!   entry per element,
//! - `timeTableContent={numberEntries=N}` expands to N+1 placeholder
//!   entries; the extra slot is reserved for the header row.
//!
//! Placeholder entries inherit the most recently declared type and
//! default; a later `type=`/`default=` never overwrites an inherited value
//! (first writer wins).
//!
//! ## Examples
//!
//! ```rust
//! use luatab::schema_from_str;
//!
//! let vali = r#"
//! reactor={
//!     gases={
//!         type="String[]",
//!         default="CH4",
//!         tableContent={values={"CH4","CO2"}},
//!     },
//! }
//! "#;
//! let doc = schema_from_str(vali).unwrap();
//! assert_eq!(doc.len(), 4);
//! assert_eq!(doc.entries()[2].label, "\"CH4\"");
//! assert_eq!(doc.entries()[2].ty, "String[]");
//! ```

use crate::entry::{Entry, Glyph, RangeDecl};
use crate::error::{Error, Result};
use crate::input::{load_source, strip_source};
use crate::lexer::{tokenize, Cursor, Tok, TokKind};
use crate::ser::{write_document, WriteOptions};
use crate::validate::{validate_entries, Report};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static PAIR_ATOM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9E.*\-]+$").unwrap());
static ARRAY_ELEM: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"[A-Za-z0-9_]+"$"#).unwrap());

/// A parsed vali document: the declared parameter tree plus, once a spec
/// document has been applied, the value carried at each position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDoc {
    entries: Vec<Entry>,
}

/// Running declaration context threaded through the vali walk.
#[derive(Clone, Debug, Default)]
struct ValiContext {
    last_type: String,
    last_default: String,
}

impl SchemaDoc {
    /// Parses a vali document from raw source text (comments and
    /// whitespace are stripped first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] on malformed literal text.
    pub fn parse(source: &str) -> Result<Self> {
        let stripped = strip_source(source);
        let toks = tokenize(&stripped)?;
        let mut parser = ValiParser::default();
        parser.items(&mut Cursor::new(&toks), 0)?;

        let mut entries = parser.entries;
        mark_containers(&mut entries);
        // Containers never carry a direct type or default; only leaves do.
        for e in entries.iter_mut() {
            if e.is_container() {
                e.ty.clear();
                e.default.clear();
            }
        }
        Ok(SchemaDoc { entries })
    }

    /// Loads and parses a vali document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read; no parsing
    /// stage runs in that case.
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

    /// Returns `true` if the document declared no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies a spec document: its value cells are aligned positionally
    /// with the entry sequence, one cell per entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when the spec document does not
    /// flatten to exactly one cell per entry, [`Error::Syntax`] on
    /// malformed text.
    pub fn load_spec_str(&mut self, source: &str) -> Result<()> {
        let stripped = strip_source(source);
        let toks = tokenize(&stripped)?;
        let mut cells = Vec::new();
        collect_cells(&toks, &mut cells)?;
        if cells.len() != self.entries.len() {
            return Err(Error::length_mismatch(self.entries.len(), cells.len()));
        }
        for (e, c) in self.entries.iter_mut().zip(cells) {
            e.spec_val = c;
        }
        Ok(())
    }

    /// Loads and applies a spec document from a file.
    pub fn load_spec_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let stripped = load_source(path)?;
        self.load_spec_str(&stripped)
    }

    /// Validates one value string per entry against the declared types and
    /// ranges. Violations are returned as data; see [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when the value list is not
    /// aligned one-to-one with the entries.
    pub fn validate_values(&self, values: &[&str]) -> Result<Report> {
        validate_entries(&self.entries, values)
    }

    /// Validates a newline-separated value list (one line per entry).
    pub fn validate_lines(&self, text: &str) -> Result<Report> {
        let values: Vec<&str> = text.lines().collect();
        self.validate_values(&values)
    }

    /// Serializes the tree back to table-literal text with the supplied
    /// values, using the default [`WriteOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] when the values fail validation; no
    /// output is produced in that case.
    pub fn write_values(&self, values: &[&str]) -> Result<String> {
        write_document(&self.entries, values, &WriteOptions::default())
    }

    /// Serializes with custom writer options.
    pub fn write_values_with_options(
        &self,
        values: &[&str],
        options: &WriteOptions,
    ) -> Result<String> {
        write_document(&self.entries, values, options)
    }

    /// Serializes from a newline-separated value list.
    pub fn write_lines(&self, text: &str) -> Result<String> {
        let values: Vec<&str> = text.lines().collect();
        self.write_values(&values)
    }

    /// The tree-view text consumed by the UI, one line per entry:
    /// `INDENT GLYPH LABEL TYPE DEFAULT` (no trailing newline).
    #[must_use]
    pub fn display_text(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{} {} {} {} {}",
                    e.indent, e.glyph, e.label, e.ty, e.default
                )
            })
            .collect();
        lines.join("\n")
    }

    /// One declared default per line, in entry order (trailing newline
    /// kept, as the UI splits on it).
    #[must_use]
    pub fn defaults_text(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.default);
            out.push('\n');
        }
        out
    }

    /// One applied spec value per line, in entry order (trailing newline
    /// kept). Empty until a spec document has been loaded.
    #[must_use]
    pub fn spec_text(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.spec_val);
            out.push('\n');
        }
        out
    }
}

/// Back-patches container glyphs: an entry shallower than its immediate
/// successor opens that successor's table. The last entry never qualifies.
fn mark_containers(entries: &mut [Entry]) {
    for i in 0..entries.len().saturating_sub(1) {
        if entries[i].indent < entries[i + 1].indent {
            entries[i].glyph = Glyph::Expandable;
        }
    }
}

#[derive(Default)]
struct ValiParser {
    entries: Vec<Entry>,
    ctx: ValiContext,
}

impl ValiParser {
    /// Parses a comma-separated sequence of `key=value` items.
    fn items(&mut self, cur: &mut Cursor, depth: u8) -> Result<()> {
        while let Some(t) = cur.peek() {
            match &t.kind {
                TokKind::Comma => {
                    cur.next();
                }
                TokKind::Quoted(_) | TokKind::Atom(_) => self.item(cur, depth)?,
                TokKind::RBrace => {
                    return Err(Error::syntax(t.pos, "unbalanced closing brace"));
                }
                TokKind::LBrace => {
                    return Err(Error::syntax(t.pos, "'{' without a preceding key"));
                }
                _ => {
                    return Err(Error::syntax(t.pos, "unexpected token"));
                }
            }
        }
        Ok(())
    }

    fn item(&mut self, cur: &mut Cursor, depth: u8) -> Result<()> {
        let key_raw = match cur.next() {
            Some(t) => t.kind.text().to_string(),
            None => return Err(Error::syntax(cur.pos(), "expected key")),
        };

        match cur.peek().map(|t| &t.kind) {
            Some(TokKind::Eq) => {
                cur.next();
            }
            _ => return Err(Error::syntax(cur.pos(), "expected '=' after key")),
        }

        match cur.peek().map(|t| t.kind.clone()) {
            Some(TokKind::LBrace) => {
                let pos = cur.pos();
                let group = cur.collect_group()?;
                match key_raw.as_str() {
                    "range" => self.range_clause(&group, pos),
                    "default" => {
                        // A braced default (string-array shape) is carried
                        // as its literal text, not descended into.
                        self.ctx.last_default = group_text(&group);
                        if let Some(e) = self.entries.last_mut() {
                            if e.default.is_empty() {
                                e.default = self.ctx.last_default.clone();
                            }
                        }
                        Ok(())
                    }
                    "tableContent" => match table_elements(&group) {
                        Some(elems) => {
                            for label in elems {
                                self.push_inherited(&label, depth);
                            }
                            Ok(())
                        }
                        None => self.container(&key_raw, depth, &group),
                    },
                    "timeTableContent" => match number_entries(&group) {
                        Some(n) => {
                            // One extra slot is reserved for the header row.
                            for _ in 0..=n {
                                self.push_inherited("timeTableContent", depth);
                            }
                            Ok(())
                        }
                        None => self.container(&key_raw, depth, &group),
                    },
                    _ => self.container(&key_raw, depth, &group),
                }
            }
            Some(TokKind::Quoted(_)) | Some(TokKind::Atom(_)) => {
                let val = match cur.next() {
                    Some(t) => t.kind.clone(),
                    None => return Err(Error::syntax(cur.pos(), "expected value")),
                };
                match key_raw.as_str() {
                    "type" => {
                        self.ctx.last_type = val.unquoted().to_string();
                        if let Some(e) = self.entries.last_mut() {
                            if e.ty.is_empty() {
                                e.ty = self.ctx.last_type.clone();
                            }
                        }
                    }
                    "default" => {
                        self.ctx.last_default = val.unquoted().to_string();
                        if let Some(e) = self.entries.last_mut() {
                            if e.default.is_empty() {
                                e.default = self.ctx.last_default.clone();
                            }
                        }
                    }
                    // Other scalar assignments carry no tree information.
                    _ => {}
                }
                Ok(())
            }
            _ => Err(Error::syntax(cur.pos(), "expected value after '='")),
        }
    }

    /// Opens an ordinary container or leaf table and descends into it.
    /// Quoted labels and literal timetable markers inherit the running
    /// declaration context.
    fn container(&mut self, key_raw: &str, depth: u8, group: &[Tok]) -> Result<()> {
        if key_raw.starts_with('"') || key_raw == "timeTableContent" {
            self.push_inherited(key_raw, depth);
        } else {
            self.entries.push(Entry::new(key_raw, depth, Glyph::Plain));
        }
        self.items(&mut Cursor::new(group), depth.saturating_add(1))
    }

    fn push_inherited(&mut self, label: &str, depth: u8) {
        let mut e = Entry::new(label, depth, Glyph::Plain);
        e.ty = self.ctx.last_type.clone();
        e.default = self.ctx.last_default.clone();
        self.entries.push(e);
    }

    fn range_clause(&mut self, group: &[Tok], pos: usize) -> Result<()> {
        let (min, max) = range_bounds(group, pos)?;
        match self.entries.last_mut() {
            Some(e) => {
                e.range = Some(RangeDecl::new(&min, &max));
                Ok(())
            }
            None => Err(Error::syntax(pos, "range clause outside a table entry")),
        }
    }
}

/// Extracts the two bounds from a range group: `{a,b}`, `{values={a,b}}`
/// and `{min=a,max=b}` all collapse to the same `(a, b)` pair.
fn range_bounds(group: &[Tok], pos: usize) -> Result<(String, String)> {
    let mut bounds = Vec::new();
    for (i, t) in group.iter().enumerate() {
        if let TokKind::Atom(a) = &t.kind {
            let is_key = matches!(group.get(i + 1).map(|t| &t.kind), Some(TokKind::Eq));
            if !is_key {
                bounds.push(a.clone());
            }
        }
    }
    match <[String; 2]>::try_from(bounds) {
        Ok([min, max]) => Ok((min, max)),
        Err(_) => Err(Error::syntax(pos, "range clause must declare two bounds")),
    }
}

/// Recognises a `{values={"a","b",...}}` group and returns the quoted
/// element labels in order.
fn table_elements(group: &[Tok]) -> Option<Vec<String>> {
    match (group.first(), group.get(1)) {
        (Some(k), Some(eq))
            if k.kind == TokKind::Atom("values".to_string()) && eq.kind == TokKind::Eq => {}
        _ => return None,
    }
    let elems: Vec<String> = group[2..]
        .iter()
        .filter_map(|t| match &t.kind {
            TokKind::Quoted(q) => Some(q.clone()),
            _ => None,
        })
        .collect();
    if elems.is_empty() {
        None
    } else {
        Some(elems)
    }
}

/// Reassembles a group's literal text, braces included.
fn group_text(group: &[Tok]) -> String {
    let mut s = String::from("{");
    for t in group {
        s.push_str(t.kind.text());
    }
    s.push('}');
    s
}

/// Recognises a `{numberEntries=N}` group.
fn number_entries(group: &[Tok]) -> Option<usize> {
    match (group.first(), group.get(1), group.get(2)) {
        (Some(k), Some(eq), Some(n))
            if k.kind == TokKind::Atom("numberEntries".to_string()) && eq.kind == TokKind::Eq =>
        {
            match &n.kind {
                TokKind::Atom(v) => v.parse().ok(),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Flattens a spec document into value cells, one per tree position.
///
/// A keyed scalar yields its value text; a keyed group is either a
/// collapsed timestamp pair (`{a,b}` as one cell), a collapsed
/// single-element string array (`{"a"}` as one cell), or a container cell
/// followed by the cells of its members. Bare members (unkeyed strings or
/// atoms inside a container) each occupy one empty cell.
fn collect_cells(toks: &[Tok], cells: &mut Vec<String>) -> Result<()> {
    let mut cur = Cursor::new(toks);
    while let Some(t) = cur.peek() {
        match &t.kind {
            TokKind::Comma => {
                cur.next();
            }
            TokKind::LBracket => {
                // Serialized quoted-label form: ["a"]=value
                cur.next();
                match cur.next().map(|t| &t.kind) {
                    Some(TokKind::Quoted(_)) => {}
                    _ => return Err(Error::syntax(cur.pos(), "expected quoted label after '['")),
                }
                match cur.next().map(|t| &t.kind) {
                    Some(TokKind::RBracket) => {}
                    _ => return Err(Error::syntax(cur.pos(), "expected ']' after quoted label")),
                }
                cell_value(&mut cur, true, cells)?;
            }
            TokKind::Quoted(_) | TokKind::Atom(_) => {
                let keyed = matches!(cur.peek_second(), Some(TokKind::Eq));
                cur.next();
                if keyed {
                    cell_value(&mut cur, true, cells)?;
                } else {
                    // Bare member: occupies a position, carries no value.
                    cells.push(String::new());
                }
            }
            TokKind::LBrace => {
                let group = cur.collect_group()?;
                group_cells(&group, false, cells)?;
            }
            _ => {
                return Err(Error::syntax(t.pos, "unexpected token in spec document"));
            }
        }
    }
    Ok(())
}

/// Consumes the `=value` part of a keyed item and appends its cells.
fn cell_value(cur: &mut Cursor, keyed: bool, cells: &mut Vec<String>) -> Result<()> {
    match cur.peek().map(|t| &t.kind) {
        Some(TokKind::Eq) => {
            cur.next();
        }
        _ => return Err(Error::syntax(cur.pos(), "expected '=' after key")),
    }
    match cur.peek().map(|t| t.kind.clone()) {
        Some(TokKind::LBrace) => {
            let group = cur.collect_group()?;
            group_cells(&group, keyed, cells)
        }
        Some(TokKind::Quoted(s)) | Some(TokKind::Atom(s)) => {
            cur.next();
            cells.push(s);
            Ok(())
        }
        _ => Err(Error::syntax(cur.pos(), "expected value after '='")),
    }
}

fn group_cells(group: &[Tok], keyed: bool, cells: &mut Vec<String>) -> Result<()> {
    // Timestamp pair: exactly {a,b} with numeric-ish halves, one cell.
    if group.len() == 3 {
        if let (TokKind::Atom(a), TokKind::Comma, TokKind::Atom(b)) =
            (&group[0].kind, &group[1].kind, &group[2].kind)
        {
            if PAIR_ATOM.is_match(a) && PAIR_ATOM.is_match(b) {
                cells.push(format!("{{{},{}}}", a, b));
                return Ok(());
            }
        }
    }
    // Single-element string array: exactly {"a"}, one cell, value kept
    // only when the group was keyed.
    if group.len() == 1 {
        if let TokKind::Quoted(q) = &group[0].kind {
            if ARRAY_ELEM.is_match(q) {
                if keyed {
                    cells.push(format!("{{{}}}", q));
                } else {
                    cells.push(String::new());
                }
                return Ok(());
            }
        }
    }
    // Ordinary container: one positional cell for the key itself, then the
    // members. A bare group contributes no cell of its own.
    if keyed {
        cells.push(String::new());
    }
    collect_cells(group, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALI: &str = r#"
    -- fermenter schema
    fermenter={
        stirred={type="Boolean",default="true"},
        volume={
            type="Double",
            default=1.0,
            range={values={0.5,2.5}},
        },
        gases={
            type="String[]",
            default="CH4",
            tableContent={values={"CH4","CO2"}},
        },
        feeding={
            type="Double",
            default=0.0,
            timeTableContent={numberEntries=2},
        },
    }
    "#;

    #[test]
    fn test_tree_shape() {
        let doc = SchemaDoc::parse(VALI).unwrap();
        let labels: Vec<&str> = doc.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "fermenter",
                "stirred",
                "volume",
                "gases",
                "\"CH4\"",
                "\"CO2\"",
                "feeding",
                "timeTableContent",
                "timeTableContent",
                "timeTableContent",
            ]
        );
        let indents: Vec<u8> = doc.entries().iter().map(|e| e.indent).collect();
        assert_eq!(indents, vec![0, 1, 1, 1, 2, 2, 1, 2, 2, 2]);
    }

    #[test]
    fn test_glyph_backpatch() {
        let doc = SchemaDoc::parse(VALI).unwrap();
        let glyphs: Vec<u8> = doc.entries().iter().map(|e| e.glyph.code()).collect();
        assert_eq!(glyphs, vec![15, 0, 0, 15, 0, 0, 15, 0, 0, 0]);
    }

    #[test]
    fn test_range_forms() {
        for clause in ["range={0.5,2.5}", "range={values={0.5,2.5}}", "range={min=0.5,max=2.5}"] {
            let src = format!(r#"p={{v={{type="Double",default=1.0,{}}}}}"#, clause);
            let doc = SchemaDoc::parse(&src).unwrap();
            let range = doc.entries()[1].range.as_ref().unwrap();
            assert_eq!(range.min, "0.5");
            assert_eq!(range.max, "2.5");
        }
    }

    #[test]
    fn test_inheritance() {
        let doc = SchemaDoc::parse(VALI).unwrap();
        for e in &doc.entries()[4..=5] {
            assert_eq!(e.ty, "String[]");
            assert_eq!(e.default, "CH4");
        }
        for e in &doc.entries()[7..=9] {
            assert_eq!(e.ty, "Double");
            assert_eq!(e.default, "0.0");
        }
    }

    #[test]
    fn test_containers_carry_no_type() {
        let doc = SchemaDoc::parse(VALI).unwrap();
        let gases = &doc.entries()[3];
        assert!(gases.is_container());
        assert!(gases.ty.is_empty());
        assert!(gases.default.is_empty());
    }

    #[test]
    fn test_timetable_reserves_header_slot() {
        let doc =
            SchemaDoc::parse(r#"p={t={type="Double",default=0.0,timeTableContent={numberEntries=2}}}"#)
                .unwrap();
        let slots = doc
            .entries()
            .iter()
            .filter(|e| e.is_timetable_slot())
            .count();
        assert_eq!(slots, 3);
    }

    #[test]
    fn test_display_text() {
        let doc = SchemaDoc::parse(r#"p={v={type="Double",default=1.5}}"#).unwrap();
        assert_eq!(doc.display_text(), "0 15 p  \n1 0 v Double 1.5");
    }

    #[test]
    fn test_load_spec_alignment() {
        let mut doc = SchemaDoc::parse(VALI).unwrap();
        let spec = r#"
        fermenter={
            stirred=true,
            volume=2.0,
            gases={"CH4","CO2"},
            feeding={
                {0,0},
                {0.5,1.2},
                {1.0,0.8},
            },
        }
        "#;
        doc.load_spec_str(spec).unwrap();
        let cells: Vec<&str> = doc.entries().iter().map(|e| e.spec_val.as_str()).collect();
        assert_eq!(
            cells,
            vec!["", "true", "2.0", "", "", "", "", "{0,0}", "{0.5,1.2}", "{1.0,0.8}"]
        );
    }

    #[test]
    fn test_load_spec_length_mismatch() {
        let mut doc = SchemaDoc::parse(VALI).unwrap();
        let err = doc.load_spec_str("fermenter={stirred=true}").unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 10, found: 2 }));
    }

    #[test]
    fn test_single_element_array_cell() {
        let mut doc =
            SchemaDoc::parse(r#"p={g={type="String[]",default="N2"}}"#).unwrap();
        doc.load_spec_str(r#"p={g={"N2"}}"#).unwrap();
        assert_eq!(doc.entries()[1].spec_val, "{\"N2\"}");
    }

    #[test]
    fn test_unbalanced_source() {
        assert!(SchemaDoc::parse("p={v={type=\"Double\"}").is_err());
        assert!(SchemaDoc::parse("p={}}").is_err());
    }
}
