use std::collections::{BTreeMap, BTreeSet};

use caseview_cli::render::{filter_label, render_page};
use caseview_model::{HitValue, Record};
use caseview_view::{FilterMode, JumpSurfaces, PageSnapshot, PageView};

fn record(index: &str, question: &str, hit: HitValue) -> Record {
    Record {
        index: index.to_string(),
        question: question.to_string(),
        options: BTreeMap::new(),
        answer: String::new(),
        prediction: String::new(),
        extracted: None,
        hit,
        image_paths: Vec::new(),
    }
}

fn snapshot(
    page: usize,
    total_pages: usize,
    visible: usize,
    total: usize,
    mode: FilterMode,
) -> PageSnapshot {
    PageSnapshot {
        page_index: page,
        total_pages,
        visible_count: visible,
        total_count: total,
        surfaces: JumpSurfaces {
            top: page + 1,
            bottom: page + 1,
        },
        mode,
    }
}

#[test]
fn renders_records_with_options_and_images() {
    let mut sky = record("3", "What color is the sky?", HitValue::Bool(true));
    sky.options.insert("B".to_string(), "Green".to_string());
    sky.options.insert("A".to_string(), "Blue".to_string());
    sky.answer = "A".to_string();
    sky.prediction = "A".to_string();
    sky.extracted = Some("A".to_string());
    sky.image_paths = vec!["/data/RealWorldQA/3.png".to_string()];

    let mut apples = record("4", "Count the apples.", HitValue::Bool(false));
    apples.answer = "2".to_string();
    apples.prediction = "3".to_string();

    let selection: BTreeSet<HitValue> = [HitValue::Bool(true), HitValue::Bool(false)]
        .into_iter()
        .collect();
    let page = PageView {
        dataset: Some("RealWorldQA".to_string()),
        records: vec![sky, apples],
        snapshot: snapshot(0, 2, 12, 20, FilterMode::HitFilter(selection)),
        notice: None,
    };

    insta::assert_snapshot!(render_page(&page), @r"
    RealWorldQA | page 1/2 | 12 of 20 records | filter: hit in [False, True]
    ----------------------------------------
    #3  hit: True
    Q: What color is the sky?
      A: Blue
      B: Green
    answer: A
    prediction: A
    extracted: A
    image: /data/RealWorldQA/3.png
    ----------------------------------------
    #4  hit: False
    Q: Count the apples.
    answer: 2
    prediction: 3
    ----------------------------------------
    page 1/2
    ");
}

#[test]
fn search_miss_renders_notice_and_empty_page() {
    let page = PageView {
        dataset: Some("OCRBench".to_string()),
        records: Vec::new(),
        snapshot: snapshot(0, 1, 0, 15, FilterMode::Search("99".to_string())),
        notice: Some("no record with index '99'".to_string()),
    };

    assert_eq!(
        render_page(&page),
        "OCRBench | page 1/1 | 0 of 15 records | filter: index = '99'\n\
         ! no record with index '99'\n\
         ----------------------------------------\n\
         page 1/1"
    );
}

#[test]
fn rendered_lines_have_no_trailing_whitespace() {
    let mut messy = record("7", "First line   \nsecond line  \n", HitValue::Missing);
    messy.prediction = "B ".to_string();
    let page = PageView {
        dataset: None,
        records: vec![messy],
        snapshot: snapshot(0, 1, 1, 1, FilterMode::All),
        notice: None,
    };

    let rendered = render_page(&page);
    assert!(rendered.starts_with("(no document) | page 1/1"));
    assert!(rendered.contains("#7  hit: -\n"));
    assert!(rendered.contains("Q: First line\nsecond line\n"));
    assert!(rendered.contains("answer:\n"));
    for line in rendered.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
    }
}

#[test]
fn filter_labels() {
    assert_eq!(filter_label(&FilterMode::All), "all");
    let selection: BTreeSet<HitValue> = [HitValue::Int(1)].into_iter().collect();
    assert_eq!(filter_label(&FilterMode::HitFilter(selection)), "hit in [1]");
}
