//! Plain-text rendering of a page of records.

use caseview_model::{HitValue, Record};
use caseview_view::{FilterMode, PageView};

const RULE: &str = "----------------------------------------";

/// Renders `page` for a terminal. Lines carry no trailing whitespace.
pub fn render_page(page: &PageView) -> String {
    let mut out = String::new();
    let snapshot = &page.snapshot;
    let dataset = page.dataset.as_deref().unwrap_or("(no document)");
    push_line(
        &mut out,
        &format!(
            "{dataset} | page {}/{} | {} of {} records | filter: {}",
            snapshot.surfaces.top,
            snapshot.total_pages,
            snapshot.visible_count,
            snapshot.total_count,
            filter_label(&snapshot.mode)
        ),
    );
    if let Some(notice) = &page.notice {
        push_line(&mut out, &format!("! {notice}"));
    }
    for record in &page.records {
        push_line(&mut out, RULE);
        render_record(&mut out, record);
    }
    push_line(&mut out, RULE);
    out.push_str(&format!(
        "page {}/{}",
        snapshot.surfaces.bottom, snapshot.total_pages
    ));
    out
}

/// Short description of the active filter.
pub fn filter_label(mode: &FilterMode) -> String {
    match mode {
        FilterMode::All => "all".to_string(),
        FilterMode::HitFilter(values) => {
            let values: Vec<String> = values.iter().map(display_hit).collect();
            format!("hit in [{}]", values.join(", "))
        }
        FilterMode::Search(term) => format!("index = '{term}'"),
    }
}

fn render_record(out: &mut String, record: &Record) {
    push_line(
        out,
        &format!("#{}  hit: {}", record.index, display_hit(&record.hit)),
    );
    push_field(out, "Q", &record.question);
    for (label, text) in record.ordered_options() {
        push_field(out, &format!("  {label}"), text);
    }
    push_field(out, "answer", &record.answer);
    push_field(out, "prediction", &record.prediction);
    if let Some(extracted) = &record.extracted {
        push_field(out, "extracted", extracted);
    }
    for path in &record.image_paths {
        push_field(out, "image", path);
    }
}

fn push_field(out: &mut String, label: &str, value: &str) {
    let value: Vec<&str> = value.trim_end().lines().map(str::trim_end).collect();
    let value = value.join("\n");
    if value.is_empty() {
        push_line(out, &format!("{label}:"));
    } else {
        push_line(out, &format!("{label}: {value}"));
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn display_hit(hit: &HitValue) -> String {
    let text = hit.to_string();
    if text.is_empty() { "-".to_string() } else { text }
}
