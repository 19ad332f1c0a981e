use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use caseview_ingest::{
    IngestError, LoadErrorKind, LoadFailure, RecordStore, read_document, write_document,
};
use caseview_model::{HitValue, find_profile};
use tempfile::TempDir;

const MMMU_DOC: &str = "\
index,question,answer,image_path,prediction,hit
1,What is shown?,A,\"[\"\"/d/1a.jpg\"\",\"\"/d/1b.jpg\"\"]\",A,1
 2 ,Which one?,B,,C,0
3,Count them,4,/d/3.jpg,4,1
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_validates_and_extracts_records() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "m_MMMU.csv", MMMU_DOC);
    let profile = find_profile("MMMU").unwrap();

    let mut store = RecordStore::new();
    let loaded = store.load(&profile, &path).unwrap();

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.records[1].index, "2");
    assert_eq!(loaded.records[0].image_paths, vec!["/d/1a.jpg", "/d/1b.jpg"]);
    assert!(loaded.records[1].image_paths.is_empty());
    assert_eq!(loaded.records[2].image_paths, vec!["/d/3.jpg"]);
    assert_eq!(loaded.records[0].hit, HitValue::Int(1));
    assert!(!loaded.records[1].is_hit());
}

#[test]
fn repeated_loads_share_one_handle_until_invalidated() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "m_MMMU.csv", MMMU_DOC);
    let profile = find_profile("MMMU").unwrap();

    let mut store = RecordStore::new();
    let first = store.load(&profile, &path).unwrap();
    let second = store.load(&profile, &path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    assert!(store.invalidate(&path));
    let third = store.load(&profile, &path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn missing_columns_fail_the_load_and_are_not_cached() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "m_AI2D.csv", "index,question,answer\n1,q,A\n");
    let profile = find_profile("AI2D").unwrap();

    let mut store = RecordStore::new();
    let err = store.load(&profile, &path).unwrap_err();
    match &err {
        IngestError::MissingColumns { columns, .. } => assert_eq!(
            columns,
            &vec!["A", "B", "C", "D", "image_path", "prediction", "hit"]
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(LoadFailure::from(&err).kind, LoadErrorKind::MissingColumns);
    assert!(store.is_empty());
}

#[test]
fn unchanged_documents_rewrite_byte_identically() {
    let dir = TempDir::new().unwrap();
    let source = "index,score,flag,note,image_path\n1,0.5,True,007,\"[\"\"a\"\"]\"\n2,,False,1.50,x.png\n";
    let input = write_fixture(&dir, "in.csv", source);
    let output = dir.path().join("out.csv");

    let document = read_document(&input).unwrap();
    let bytes = write_document(&document, &output).unwrap();

    assert_eq!(String::from_utf8(bytes).unwrap(), source);
    assert_eq!(fs::read_to_string(&output).unwrap(), source);
}
