//! Error types for batch conversion.

use std::path::PathBuf;

use thiserror::Error;

use caseview_ingest::IngestError;
use caseview_model::ModelError;

/// Errors that stop a whole batch before any task runs.
///
/// Per-task problems never surface here; they become
/// [`crate::TaskOutcome::Failure`] entries in the report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("missing setting '{name}': {hint}")]
    MissingSetting { name: &'static str, hint: &'static str },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
