use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use caseview_core::{BatchReport, ConvertSettings, TaskOutcome};
use caseview_model::DatasetProfile;

/// Digest characters shown in the summary table.
const SHORT_DIGEST: usize = 12;

pub fn print_batch_summary(settings: &ConvertSettings, report: &BatchReport) {
    println!("Input: {}", settings.input_dir.display());
    println!("Output: {}", report.output_root.display());
    println!("Base data: {}", settings.base_data);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Fallbacks"),
        header_cell("Output / Reason"),
        header_cell("SHA-256"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_rows = 0usize;
    let mut total_fallbacks = 0usize;
    for task in &report.tasks {
        let row = match &task.outcome {
            TaskOutcome::Success {
                output_path,
                rows,
                fallbacks,
                sha256,
            } => {
                total_rows += rows;
                total_fallbacks += fallbacks;
                let file_name = output_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| output_path.display().to_string());
                vec![
                    Cell::new(&task.dataset),
                    status_cell(&task.outcome),
                    Cell::new(rows),
                    count_cell(*fallbacks, Color::Yellow),
                    Cell::new(file_name),
                    dim_cell(sha256.get(..SHORT_DIGEST).unwrap_or(sha256)),
                ]
            }
            TaskOutcome::Skipped { reason } => vec![
                Cell::new(&task.dataset),
                status_cell(&task.outcome),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell(reason),
                dim_cell("-"),
            ],
            TaskOutcome::Failure { kind, error } => vec![
                Cell::new(&task.dataset),
                status_cell(&task.outcome),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(format!("{kind}: {error}")).fg(Color::Red),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} ok / {} skipped / {} failed",
            report.success_count(),
            report.skipped_count(),
            report.failure_count()
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(total_fallbacks, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_profiles(profiles: &[DatasetProfile], model_prefix: &str) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Keyword"),
        header_cell("Document"),
        header_cell("Image folder"),
        header_cell("Path strategy"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(&profile.keyword),
            Cell::new(profile.file_name(model_prefix)),
            match &profile.subfolder {
                Some(subfolder) => Cell::new(subfolder),
                None => dim_cell("-"),
            },
            Cell::new(&profile.path_strategy),
        ]);
    }
    println!("{table}");
}

fn status_cell(outcome: &TaskOutcome) -> Cell {
    let color = match outcome {
        TaskOutcome::Success { .. } => Color::Green,
        TaskOutcome::Skipped { .. } => Color::DarkGrey,
        TaskOutcome::Failure { .. } => Color::Red,
    };
    Cell::new(outcome.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
