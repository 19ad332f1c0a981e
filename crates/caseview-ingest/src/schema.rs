//! Column validation and record extraction.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use caseview_model::{
    CellValue, DatasetProfile, Document, HitValue, IMAGE_PATH_COLUMN, INDEX_COLUMN,
    OPTION_LABELS, RawRecord, Record,
};
use caseview_transform::{looks_like_list, parse_list_literal};

use crate::error::{IngestError, Result};

/// Column holding the extracted short answer in judge-scored exports.
pub const EXTRACTED_COLUMN: &str = "res";

/// Required columns absent from `columns`, in `required` order.
pub fn missing_columns(columns: &[String], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !columns.contains(name))
        .cloned()
        .collect()
}

/// Fails with every absent column when `columns` lacks any of `required`.
pub fn check_columns(path: &Path, columns: &[String], required: &[String]) -> Result<()> {
    let missing = missing_columns(columns, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        })
    }
}

/// Validates a document against a profile and extracts its records.
pub fn validate_records(
    path: &Path,
    document: &Document,
    profile: &DatasetProfile,
) -> Result<Vec<Record>> {
    check_columns(path, &document.columns, &profile.required_columns)?;
    let records: Vec<Record> = document.rows.iter().map(to_record).collect();

    let duplicates = duplicate_indices(&records);
    if !duplicates.is_empty() {
        tracing::warn!(
            path = %path.display(),
            dataset = %profile.name,
            duplicates = %duplicates.join(", "),
            "index values are not unique; an index search returns every duplicate"
        );
    }
    Ok(records)
}

/// Index values carried by more than one record, sorted.
///
/// Blank indices are ignored.
pub fn duplicate_indices(records: &[Record]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        if record.index.is_empty() {
            continue;
        }
        if !seen.insert(record.index.as_str()) {
            duplicates.insert(record.index.clone());
        }
    }
    duplicates.into_iter().collect()
}

/// Trimmed string form of an `index` cell.
pub fn normalize_index(cell: Option<&CellValue>) -> String {
    cell.map(CellValue::to_text_lossy)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Image references stored in an `image_path` cell.
///
/// Missing is empty, lists and textual list encodings yield their elements
/// and anything else is one reference. An unparseable list encoding is kept
/// as a single opaque reference.
pub fn load_image_paths(cell: Option<&CellValue>) -> Vec<String> {
    match cell {
        None => Vec::new(),
        Some(cell) if cell.is_missing() => Vec::new(),
        Some(CellValue::List(items)) => items.clone(),
        Some(CellValue::Text(text)) if looks_like_list(text) => {
            parse_list_literal(text).unwrap_or_else(|| vec![text.clone()])
        }
        Some(other) => other.as_scalar_text().into_iter().collect(),
    }
}

fn text_of(row: &RawRecord, column: &str) -> String {
    row.get(column).map(CellValue::to_text_lossy).unwrap_or_default()
}

fn to_record(row: &RawRecord) -> Record {
    let options: BTreeMap<String, String> = OPTION_LABELS
        .iter()
        .filter_map(|label| {
            let cell = row.get(label)?;
            if cell.is_missing() {
                return None;
            }
            Some(((*label).to_string(), cell.to_text_lossy()))
        })
        .collect();

    Record {
        index: normalize_index(row.get(INDEX_COLUMN)),
        question: text_of(row, "question"),
        options,
        answer: text_of(row, "answer"),
        prediction: text_of(row, "prediction"),
        extracted: row
            .get(EXTRACTED_COLUMN)
            .filter(|cell| !cell.is_missing())
            .map(CellValue::to_text_lossy),
        hit: HitValue::from_cell(row.get("hit")),
        image_paths: load_image_paths(row.get(IMAGE_PATH_COLUMN)),
    }
}
