//! Typed spreadsheet cells and raw (pre-validation) rows.

use serde::{Deserialize, Serialize};

/// A single typed cell value as read from, or written to, a tabular document.
///
/// Typing on read is canonical-only: a cell is typed as a number or boolean
/// only when re-rendering it reproduces the exact source text. Everything else
/// stays `Text`, whitespace-only cells included, so untouched CSV cells
/// survive a read/write cycle byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    /// Types a raw cell string.
    ///
    /// Only the empty string is `Missing`. Whitespace-only cells stay `Text`
    /// so they are written back unchanged; [`CellValue::is_missing`] still
    /// treats them as blank.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Missing;
        }
        match raw {
            "True" => return CellValue::Bool(true),
            "False" => return CellValue::Bool(false),
            _ => {}
        }
        if let Ok(value) = raw.parse::<i64>()
            && value.to_string() == raw
        {
            return CellValue::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>()
            && value.is_finite()
            && format_numeric(value) == raw
        {
            return CellValue::Float(value);
        }
        CellValue::Text(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Scalar text form of the value, `None` when missing.
    ///
    /// Lists have no scalar form and also return `None`.
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            CellValue::Missing | CellValue::List(_) => None,
            CellValue::Bool(value) => Some(if *value { "True" } else { "False" }.to_string()),
            CellValue::Int(value) => Some(value.to_string()),
            CellValue::Float(value) => Some(format_numeric(*value)),
            CellValue::Text(text) => Some(text.clone()),
        }
    }

    /// Same as [`CellValue::as_scalar_text`] but never fails: missing is empty.
    pub fn to_text_lossy(&self) -> String {
        match self {
            CellValue::List(items) => items.join(", "),
            other => other.as_scalar_text().unwrap_or_default(),
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// One row of an input document: ordered column name to value pairs.
///
/// A row has no identity beyond its position until it is validated into a
/// [`crate::Record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    cells: Vec<(String, CellValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, CellValue)>,
        S: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Replaces the value of `column`, appending the column when absent.
    pub fn set(&mut self, column: &str, value: CellValue) {
        match self.cells.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column.to_string(), value)),
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A loaded single-sheet document: header row plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl Document {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: RawRecord) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    /// Appends `column` to the header when it is not already present.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header names that occur more than once, in first-repeat order.
    ///
    /// Cells are addressed by column name, so a document with repeated names
    /// cannot be written back without losing values.
    pub fn duplicate_columns(&self) -> Vec<String> {
        let mut duplicates: Vec<String> = Vec::new();
        for (position, name) in self.columns.iter().enumerate() {
            if self.columns[..position].contains(name) && !duplicates.contains(name) {
                duplicates.push(name.clone());
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_non_canonical_numbers_as_text() {
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse("0.5"), CellValue::Float(0.5));
        assert_eq!(CellValue::parse("007"), CellValue::Text("007".to_string()));
        assert_eq!(CellValue::parse("1.50"), CellValue::Text("1.50".to_string()));
        assert_eq!(CellValue::parse("nan"), CellValue::Text("nan".to_string()));
    }

    #[test]
    fn parse_booleans_and_missing() {
        assert_eq!(CellValue::parse("True"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("False"), CellValue::Bool(false));
        assert_eq!(CellValue::parse("true"), CellValue::Text("true".to_string()));
        assert_eq!(CellValue::parse(""), CellValue::Missing);
    }

    #[test]
    fn whitespace_cells_stay_text_but_count_as_missing() {
        let cell = CellValue::parse("   ");
        assert_eq!(cell, CellValue::Text("   ".to_string()));
        assert!(cell.is_missing());
        assert_eq!(cell.to_text_lossy(), "   ");
    }

    #[test]
    fn format_numeric_strips_trailing_zeros() {
        assert_eq!(format_numeric(42.0), "42");
        assert_eq!(format_numeric(0.25), "0.25");
        assert_eq!(format_numeric(-3.0), "-3");
    }

    #[test]
    fn duplicate_columns_are_listed_once() {
        let doc = Document::new(
            ["index", "note", "hit", "note", "note", "hit"]
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        );
        assert_eq!(doc.duplicate_columns(), vec!["note", "hit"]);
        assert!(Document::new(vec!["index".to_string()]).duplicate_columns().is_empty());
    }

    #[test]
    fn raw_record_set_appends_unknown_columns() {
        let mut row = RawRecord::from_pairs([("index", CellValue::Int(1))]);
        row.set("image_path", CellValue::Text("a.jpg".to_string()));
        row.set("index", CellValue::Int(2));
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["index", "image_path"]);
        assert_eq!(row.get("index"), Some(&CellValue::Int(2)));
    }
}
