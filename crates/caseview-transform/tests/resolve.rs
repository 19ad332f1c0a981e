//! Path resolution behavior per strategy.

use caseview_model::{CellValue, PathStrategyKind, RawRecord};
use caseview_transform::{ResolutionKind, apply, resolve, resolve_image_paths};
use proptest::prelude::*;

fn record(pairs: Vec<(&str, CellValue)>) -> RawRecord {
    RawRecord::from_pairs(pairs)
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn list_aware_parses_textual_list() {
    let row = record(vec![("image_path", text("['a.jpg','b.jpg']"))]);
    assert_eq!(
        resolve_image_paths(&PathStrategyKind::ListAware, "/data", &row),
        vec!["/data/a.jpg".to_string(), "/data/b.jpg".to_string()]
    );
}

#[test]
fn list_aware_null_yields_empty_list() {
    let row = record(vec![("image_path", CellValue::Missing)]);
    assert!(resolve_image_paths(&PathStrategyKind::ListAware, "/data", &row).is_empty());

    let absent = record(vec![("index", CellValue::Int(1))]);
    let resolution = resolve(&PathStrategyKind::ListAware, "/data", &absent);
    assert_eq!(resolution.kind, ResolutionKind::Empty);
    assert_eq!(resolution.value, Some(CellValue::List(Vec::new())));
}

#[test]
fn list_aware_scalar_is_single_element() {
    let row = record(vec![("image_path", text("a.jpg"))]);
    assert_eq!(
        resolve_image_paths(&PathStrategyKind::ListAware, "/data", &row),
        vec!["/data/a.jpg".to_string()]
    );
}

#[test]
fn list_aware_structured_list_strips_each_leading_separator() {
    let row = record(vec![(
        "image_path",
        CellValue::List(vec!["/a.jpg".to_string(), "b/c.jpg".to_string()]),
    )]);
    assert_eq!(
        resolve_image_paths(&PathStrategyKind::ListAware, "/data/MMMU/", &row),
        vec!["/data/MMMU/a.jpg".to_string(), "/data/MMMU/b/c.jpg".to_string()]
    );
}

#[test]
fn id_synthesis_ignores_existing_image_path() {
    let strategy = PathStrategyKind::id_synthesis("id", ".png");
    let row = record(vec![
        ("id", CellValue::Int(42)),
        ("image_path", text("somewhere/else.jpg")),
    ]);
    assert_eq!(
        resolve_image_paths(&strategy, "/data/LogicVista/", &row),
        vec!["/data/LogicVista/42.png".to_string()]
    );
}

#[test]
fn id_synthesis_renders_integral_floats_without_fraction() {
    let strategy = PathStrategyKind::id_synthesis("index", ".png");
    let mut row = record(vec![("index", CellValue::Float(42.0))]);
    let kind = apply(&strategy, "/data/RealWorldQA/", &mut row);
    assert_eq!(kind, ResolutionKind::Synthesized);
    assert_eq!(row.get("image_path"), Some(&text("/data/RealWorldQA/42.png")));
}

#[test]
fn id_synthesis_with_missing_source_leaves_row_unchanged() {
    let strategy = PathStrategyKind::id_synthesis("id", ".png");
    let mut row = record(vec![("id", CellValue::Missing), ("image_path", text("x.png"))]);
    let before = row.clone();
    assert_eq!(apply(&strategy, "/data/", &mut row), ResolutionKind::Unchanged);
    assert_eq!(row, before);
}

#[test]
fn direct_prefix_strips_leading_separators() {
    let mut row = record(vec![("image_path", text("/images/1.jpg"))]);
    let kind = apply(&PathStrategyKind::DirectPrefix, "/data/LMUData", &mut row);
    assert_eq!(kind, ResolutionKind::Prefixed);
    assert_eq!(row.get("image_path"), Some(&text("/data/LMUData/images/1.jpg")));
}

#[test]
fn direct_prefix_absent_column_is_not_added() {
    let mut row = record(vec![("index", CellValue::Int(3))]);
    apply(&PathStrategyKind::DirectPrefix, "/data", &mut row);
    assert!(!row.contains("image_path"));
}

proptest! {
    /// Resolution never panics and list-aware output always carries the prefix.
    #[test]
    fn list_aware_never_fails(raw in ".{0,40}") {
        let row = record(vec![("image_path", CellValue::parse(&raw))]);
        let paths = resolve_image_paths(&PathStrategyKind::ListAware, "/p", &row);
        for path in paths {
            prop_assert!(path.starts_with("/p/"));
        }
    }

    /// Direct prefixing is deterministic.
    #[test]
    fn direct_prefix_is_deterministic(raw in "[a-z/]{1,20}") {
        let row = record(vec![("image_path", text(&raw))]);
        let first = resolve(&PathStrategyKind::DirectPrefix, "/p", &row);
        let second = resolve(&PathStrategyKind::DirectPrefix, "/p", &row);
        prop_assert_eq!(first, second);
    }
}
