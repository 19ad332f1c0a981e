//! Evaluation export loading.
//!
//! This crate reads and writes result documents (XLSX workbooks or UTF-8 CSV,
//! one header row), validates them against a dataset profile and caches the
//! validated records.
//!
//! # Features
//!
//! - **Documents**: typed cell reading and canonical writing with atomic replace,
//!   for workbooks and CSV alike
//! - **Schema**: required-column checks that report every absent column
//! - **Discovery**: keyword-based document lookup in a result folder
//! - **Record Store**: per-path cache of validated records
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use caseview_ingest::{RecordStore, discover_document};
//! use caseview_model::find_profile;
//!
//! let profile = find_profile("MMMU")?;
//! let found = discover_document(Path::new("results_for_check"), &profile)?;
//! let mut store = RecordStore::new();
//! let document = store.load(&profile, &found.path)?;
//! ```

mod discovery;
mod document;
mod error;
mod schema;
mod store;

// === Error Types ===
pub use error::{IngestError, LoadErrorKind, LoadFailure, Result};

// === Documents ===
pub use document::{document_format, encode_document, read_document, write_document};

// === Schema ===
pub use schema::{
    EXTRACTED_COLUMN, check_columns, duplicate_indices, load_image_paths, missing_columns,
    normalize_index, validate_records,
};

// === Discovery ===
pub use discovery::{DiscoveredDocument, discover_document, list_documents};

// === Record Store ===
pub use store::{LoadedDocument, RecordStore};
