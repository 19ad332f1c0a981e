//! Batch conversion pipeline.
//!
//! Each [`ConversionTask`] is converted on its own: the input document is
//! read, checked for the columns its path strategy needs, every row's image
//! reference is resolved and the result is written under the output root.
//! A task that fails becomes a `Failure` entry in the [`BatchReport`]; the
//! remaining tasks still run.
//!
//! Task file names name workbooks. When the workbook is absent a CSV export
//! with the same stem is converted instead, and the output keeps the format of
//! whichever input was read.
//!
//! Tasks run sequentially in the order given.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use caseview_ingest::{IngestError, LoadErrorKind, check_columns, read_document, write_document};
use caseview_model::{ConversionTask, DocumentFormat, IMAGE_PATH_COLUMN, conversion_tasks};
use caseview_transform::{ResolutionKind, apply};

use crate::config::ConvertSettings;
use crate::error::{PipelineError, Result};
use crate::hash::sha256_hex;

/// Result of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskOutcome {
    Success {
        output_path: PathBuf,
        rows: usize,
        /// Rows whose list encoding did not parse and was kept as one path.
        fallbacks: usize,
        sha256: String,
    },
    Skipped {
        reason: String,
    },
    Failure {
        kind: LoadErrorKind,
        error: String,
    },
}

impl TaskOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            TaskOutcome::Success { .. } => "SUCCESS",
            TaskOutcome::Skipped { .. } => "SKIPPED",
            TaskOutcome::Failure { .. } => "FAILURE",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failure { .. })
    }
}

/// Outcome of one task together with what it was about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub dataset: String,
    pub input_path: PathBuf,
    pub outcome: TaskOutcome,
}

/// Outcomes of a batch run, in task order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub output_root: PathBuf,
    pub tasks: Vec<TaskReport>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.outcome.is_success()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t.outcome, TaskOutcome::Skipped { .. }))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.outcome.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Paths of all documents written by the run.
    pub fn outputs(&self) -> Vec<&Path> {
        self.tasks
            .iter()
            .filter_map(|t| match &t.outcome {
                TaskOutcome::Success { output_path, .. } => Some(output_path.as_path()),
                _ => None,
            })
            .collect()
    }
}

/// Converts every task, creating `output_root` when needed.
///
/// Only a failure to create the output root aborts the batch.
pub fn process(
    input_root: &Path,
    output_root: &Path,
    base_data: &str,
    tasks: &[ConversionTask],
) -> Result<BatchReport> {
    process_with(input_root, output_root, base_data, tasks, |_| {})
}

/// Same as [`process`], calling `on_task` after each task finishes.
pub fn process_with<F>(
    input_root: &Path,
    output_root: &Path,
    base_data: &str,
    tasks: &[ConversionTask],
    mut on_task: F,
) -> Result<BatchReport>
where
    F: FnMut(&TaskReport),
{
    std::fs::create_dir_all(output_root).map_err(|e| PipelineError::CreateOutputDir {
        path: output_root.to_path_buf(),
        source: e,
    })?;

    let batch_start = Instant::now();
    let mut report = BatchReport {
        output_root: output_root.to_path_buf(),
        tasks: Vec::with_capacity(tasks.len()),
    };

    for task in tasks {
        let input_path = locate_input(input_root, &task.input_filename);
        let span = info_span!(
            "convert_task",
            dataset = %task.profile.name,
            input = %task.input_filename
        );
        let task_start = Instant::now();
        let outcome = span.in_scope(|| {
            let outcome = match convert_task(&input_path, output_root, base_data, task) {
                Ok(outcome) => outcome,
                Err(err) if err.is_not_found() => TaskOutcome::Skipped {
                    reason: err.to_string(),
                },
                Err(err) => TaskOutcome::Failure {
                    kind: err.kind(),
                    error: err.to_string(),
                },
            };
            log_outcome(task, &outcome, task_start);
            outcome
        });

        let task_report = TaskReport {
            dataset: task.profile.name.clone(),
            input_path,
            outcome,
        };
        on_task(&task_report);
        report.tasks.push(task_report);
    }

    info!(
        tasks = report.tasks.len(),
        succeeded = report.success_count(),
        skipped = report.skipped_count(),
        failed = report.failure_count(),
        duration_ms = batch_start.elapsed().as_millis(),
        "batch complete"
    );
    Ok(report)
}

/// Builds the reference task list for the configured model prefix and runs it.
pub fn run_reference_batch(settings: &ConvertSettings) -> Result<BatchReport> {
    let tasks = conversion_tasks(&settings.model_prefix)?;
    process(
        &settings.input_dir,
        &settings.output_dir,
        &settings.base_data,
        &tasks,
    )
}

/// Path of a task's input: the named file, or the first sibling in another
/// document format that exists. Falls back to the named file.
fn locate_input(input_root: &Path, input_filename: &str) -> PathBuf {
    let named = input_root.join(input_filename);
    if named.is_file() {
        return named;
    }
    DocumentFormat::ALL
        .into_iter()
        .map(|format| named.with_extension(format.extension()))
        .find(|candidate| candidate.is_file())
        .unwrap_or(named)
}

fn convert_task(
    input_path: &Path,
    output_root: &Path,
    base_data: &str,
    task: &ConversionTask,
) -> std::result::Result<TaskOutcome, IngestError> {
    if !input_path.is_file() {
        return Ok(TaskOutcome::Skipped {
            reason: format!("input not found: {}", input_path.display()),
        });
    }

    let profile = &task.profile;
    let strategy = &profile.path_strategy;
    let prefix = profile.prefix_path(base_data);
    debug!(prefix = %prefix, strategy = %strategy, "resolved image prefix");

    let mut document = read_document(input_path)?;
    check_columns(input_path, &document.columns, &strategy.path_columns())?;

    let mut fallbacks = 0;
    for (position, row) in document.rows.iter_mut().enumerate() {
        let kind = apply(strategy, &prefix, row);
        trace!(row = position, kind = ?kind, "resolved row");
        if kind == ResolutionKind::ListFallback {
            fallbacks += 1;
        }
    }
    if document.rows.iter().any(|row| row.contains(IMAGE_PATH_COLUMN)) {
        document.ensure_column(IMAGE_PATH_COLUMN);
    }
    if fallbacks > 0 {
        warn!(
            fallbacks,
            "image list encodings did not parse; kept the raw value as one path"
        );
    }

    let mut output_path = output_root.join(&task.output_filename);
    if let Some(format) = DocumentFormat::from_path(input_path) {
        output_path.set_extension(format.extension());
    }
    let bytes = write_document(&document, &output_path)?;
    Ok(TaskOutcome::Success {
        output_path,
        rows: document.row_count(),
        fallbacks,
        sha256: sha256_hex(&bytes),
    })
}

fn log_outcome(task: &ConversionTask, outcome: &TaskOutcome, started: Instant) {
    let duration_ms = started.elapsed().as_millis();
    match outcome {
        TaskOutcome::Success {
            output_path, rows, ..
        } => info!(
            dataset = %task.profile.name,
            rows,
            output = %output_path.display(),
            duration_ms,
            "task converted"
        ),
        TaskOutcome::Skipped { reason } => info!(
            dataset = %task.profile.name,
            reason = %reason,
            "task skipped"
        ),
        TaskOutcome::Failure { kind, error } => warn!(
            dataset = %task.profile.name,
            kind = %kind,
            error = %error,
            duration_ms,
            "task failed"
        ),
    }
}
