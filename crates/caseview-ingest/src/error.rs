//! Error types for document loading.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading, validating or writing documents.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document file not found.
    #[error("document not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No document in a folder matched a dataset keyword.
    #[error("no document matching '{keyword}' in {folder}")]
    NoMatchingDocument { folder: PathBuf, keyword: String },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension names no supported document format.
    #[error("unsupported document format: {path} (expected .xlsx or .csv)")]
    UnsupportedFormat { path: PathBuf },

    // === Workbook Errors ===
    /// Unreadable workbook or worksheet.
    #[error("failed to read workbook {path}: {message}")]
    XlsxRead { path: PathBuf, message: String },

    /// Failed to build a workbook from a document.
    #[error("failed to encode workbook {path}: {message}")]
    XlsxWrite { path: PathBuf, message: String },

    // === CSV Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to encode a document as CSV.
    #[error("failed to encode CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    /// Document has no header row.
    #[error("document is empty: {path}")]
    EmptyDocument { path: PathBuf },

    // === Schema Errors ===
    /// Header names repeated; cells are addressed by column name.
    #[error("duplicate column names in {path}: {}", columns.join(", "))]
    DuplicateColumns { path: PathBuf, columns: Vec<String> },

    /// Required columns absent from the header.
    #[error("missing required columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

impl IngestError {
    /// Coarse category shown to the host.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            IngestError::DirectoryNotFound { .. }
            | IngestError::FileNotFound { .. }
            | IngestError::NoMatchingDocument { .. } => LoadErrorKind::NotFound,
            IngestError::MissingColumns { .. } => LoadErrorKind::MissingColumns,
            IngestError::UnsupportedFormat { .. }
            | IngestError::XlsxRead { .. }
            | IngestError::XlsxWrite { .. }
            | IngestError::CsvParse { .. }
            | IngestError::CsvWrite { .. }
            | IngestError::EmptyDocument { .. }
            | IngestError::DuplicateColumns { .. } => LoadErrorKind::Malformed,
            IngestError::DirectoryRead { .. }
            | IngestError::FileRead { .. }
            | IngestError::FileWrite { .. } => LoadErrorKind::Io,
        }
    }

    /// Whether the error means the document simply is not there.
    pub fn is_not_found(&self) -> bool {
        self.kind() == LoadErrorKind::NotFound
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Host-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    NotFound,
    MissingColumns,
    Malformed,
    Io,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadErrorKind::NotFound => "not found",
            LoadErrorKind::MissingColumns => "missing columns",
            LoadErrorKind::Malformed => "malformed document",
            LoadErrorKind::Io => "i/o error",
        };
        f.write_str(label)
    }
}

/// Structured `{kind, message}` pair reported to hosts instead of raw errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl From<&IngestError> for LoadFailure {
    fn from(err: &IngestError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<IngestError> for LoadFailure {
    fn from(err: IngestError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LoadFailure {}
