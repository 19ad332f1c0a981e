//! Image path resolution.
//!
//! A single pure dispatch over [`PathStrategyKind`]. Resolution never fails:
//! missing or malformed path fields degrade to "unchanged" or to an empty
//! list so partially corrupt exports stay viewable.

use serde::Serialize;
use tracing::trace;

use caseview_model::{CellValue, IMAGE_PATH_COLUMN, PathStrategyKind, RawRecord, format_numeric};

use crate::list_literal::{looks_like_list, parse_list_literal};

/// How a row's image reference was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Existing scalar reference was prefixed.
    Prefixed,
    /// Reference was synthesized from an identifier column.
    Synthesized,
    /// A list (structured or textual) was parsed and every element prefixed.
    ListParsed,
    /// A textual list encoding failed to parse and was treated as one path.
    ListFallback,
    /// No reference present; resolved to an empty list.
    Empty,
    /// Row left untouched.
    Unchanged,
}

/// Result of resolving one row.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResolution {
    /// New `image_path` cell value; `None` leaves the row as it was.
    pub value: Option<CellValue>,
    pub kind: ResolutionKind,
}

impl PathResolution {
    fn unchanged() -> Self {
        Self {
            value: None,
            kind: ResolutionKind::Unchanged,
        }
    }

    fn with(value: CellValue, kind: ResolutionKind) -> Self {
        Self {
            value: Some(value),
            kind,
        }
    }

    /// Resolved references as an ordered list.
    ///
    /// Unchanged rows report whatever the existing cell holds.
    pub fn image_paths(&self, record: &RawRecord) -> Vec<String> {
        match &self.value {
            Some(value) => cell_paths(value),
            None => record.get(IMAGE_PATH_COLUMN).map(cell_paths).unwrap_or_default(),
        }
    }
}

fn cell_paths(value: &CellValue) -> Vec<String> {
    match value {
        CellValue::List(items) => items.clone(),
        other => other.as_scalar_text().into_iter().collect(),
    }
}

/// Joins `prefix` and `path` with exactly one separator.
///
/// Leading separators on `path` are stripped, trailing separators on
/// `prefix` are collapsed.
pub fn prefix_path(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Computes the `image_path` value for one row.
pub fn resolve(strategy: &PathStrategyKind, prefix: &str, record: &RawRecord) -> PathResolution {
    match strategy {
        PathStrategyKind::DirectPrefix => resolve_direct(prefix, record),
        PathStrategyKind::IdSynthesis {
            source_field,
            extension,
        } => resolve_synthesized(prefix, record, source_field, extension),
        PathStrategyKind::ListAware => resolve_list(prefix, record),
        PathStrategyKind::Passthrough => PathResolution::unchanged(),
    }
}

/// Resolves and writes the result back into the row.
pub fn apply(strategy: &PathStrategyKind, prefix: &str, record: &mut RawRecord) -> ResolutionKind {
    let resolution = resolve(strategy, prefix, record);
    if let Some(value) = resolution.value {
        record.set(IMAGE_PATH_COLUMN, value);
    }
    resolution.kind
}

/// Resolved references for a row without modifying it.
pub fn resolve_image_paths(
    strategy: &PathStrategyKind,
    prefix: &str,
    record: &RawRecord,
) -> Vec<String> {
    resolve(strategy, prefix, record).image_paths(record)
}

fn resolve_direct(prefix: &str, record: &RawRecord) -> PathResolution {
    match record.get(IMAGE_PATH_COLUMN) {
        None => PathResolution::unchanged(),
        Some(cell) if cell.is_missing() => PathResolution::unchanged(),
        Some(cell) => {
            let path = prefix_path(prefix, &cell.to_text_lossy());
            PathResolution::with(CellValue::Text(path), ResolutionKind::Prefixed)
        }
    }
}

fn resolve_synthesized(
    prefix: &str,
    record: &RawRecord,
    source_field: &str,
    extension: &str,
) -> PathResolution {
    let Some(source) = record
        .get(source_field)
        .filter(|cell| !cell.is_missing())
        .and_then(identifier_text)
    else {
        return PathResolution::unchanged();
    };
    let path = format!("{prefix}{source}{extension}");
    PathResolution::with(CellValue::Text(path), ResolutionKind::Synthesized)
}

/// File stem for an identifier cell.
///
/// Integral numbers stored as decimal text (`42.0`) name the same image as
/// the integer, so they are rendered without the fractional part. Integer
/// text such as `007` is kept as written.
fn identifier_text(cell: &CellValue) -> Option<String> {
    let text = cell.as_scalar_text()?;
    let text = text.trim();
    if text.parse::<i64>().is_ok() {
        return Some(text.to_string());
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(format_numeric(value)),
        _ => Some(text.to_string()),
    }
}

fn resolve_list(prefix: &str, record: &RawRecord) -> PathResolution {
    let cell = match record.get(IMAGE_PATH_COLUMN) {
        Some(cell) if !cell.is_missing() => cell,
        _ => return PathResolution::with(CellValue::List(Vec::new()), ResolutionKind::Empty),
    };
    let prefix_all = |items: &[String]| -> Vec<String> {
        items.iter().map(|item| prefix_path(prefix, item)).collect()
    };
    match cell {
        CellValue::List(items) => PathResolution::with(
            CellValue::List(prefix_all(items.as_slice())),
            ResolutionKind::ListParsed,
        ),
        CellValue::Text(text) if looks_like_list(text) => match parse_list_literal(text) {
            Some(items) => PathResolution::with(
                CellValue::List(prefix_all(items.as_slice())),
                ResolutionKind::ListParsed,
            ),
            None => {
                trace!(raw_len = text.len(), "list encoding did not parse");
                PathResolution::with(
                    CellValue::List(vec![prefix_path(prefix, text)]),
                    ResolutionKind::ListFallback,
                )
            }
        },
        scalar => PathResolution::with(
            CellValue::List(vec![prefix_path(prefix, &scalar.to_text_lossy())]),
            ResolutionKind::Prefixed,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(path: CellValue) -> RawRecord {
        RawRecord::from_pairs([("index", CellValue::Int(7)), ("image_path", path)])
    }

    #[test]
    fn prefix_path_uses_one_separator() {
        assert_eq!(prefix_path("/data", "a.jpg"), "/data/a.jpg");
        assert_eq!(prefix_path("/data/", "//a.jpg"), "/data/a.jpg");
    }

    #[test]
    fn direct_prefix_skips_missing_cells() {
        let record = row(CellValue::Missing);
        let resolution = resolve(&PathStrategyKind::DirectPrefix, "/data", &record);
        assert_eq!(resolution.kind, ResolutionKind::Unchanged);
        assert!(resolution.image_paths(&record).is_empty());
    }

    #[test]
    fn passthrough_never_touches_the_row() {
        let mut record = row(CellValue::Text("x.png".to_string()));
        let before = record.clone();
        let kind = apply(&PathStrategyKind::Passthrough, "/data", &mut record);
        assert_eq!(kind, ResolutionKind::Unchanged);
        assert_eq!(record, before);
    }

    #[test]
    fn synthesized_id_drops_integral_fraction() {
        let record = RawRecord::from_pairs([("id", CellValue::Text(" 42.0 ".to_string()))]);
        let strategy = PathStrategyKind::id_synthesis("id", ".png");
        assert_eq!(
            resolve_image_paths(&strategy, "/data/LogicVista/", &record),
            vec!["/data/LogicVista/42.png".to_string()]
        );

        let padded = RawRecord::from_pairs([("id", CellValue::Text("007".to_string()))]);
        assert_eq!(
            resolve_image_paths(&strategy, "/p/", &padded),
            vec!["/p/007.png".to_string()]
        );

        let fractional = RawRecord::from_pairs([("id", CellValue::Text("4.5".to_string()))]);
        assert_eq!(
            resolve_image_paths(&strategy, "/p/", &fractional),
            vec!["/p/4.5.png".to_string()]
        );
    }

    #[test]
    fn list_fallback_keeps_raw_value_as_single_path() {
        let record = row(CellValue::Text("['a.jpg', 'b.jpg'".to_string()));
        let resolution = resolve(&PathStrategyKind::ListAware, "/data", &record);
        assert_eq!(resolution.kind, ResolutionKind::ListFallback);
        assert_eq!(
            resolution.image_paths(&record),
            vec!["/data/['a.jpg', 'b.jpg'".to_string()]
        );
    }
}
