//! Batch conversion of raw evaluation exports.
//!
//! Rewrites each dataset's document so its image references are absolute
//! paths under a base data directory, isolating failures per document.
//!
//! # Example
//!
//! ```ignore
//! use caseview_core::{ConvertConfig, run_reference_batch};
//!
//! let settings = ConvertConfig::load("caseview.toml".as_ref())?.resolve()?;
//! let report = run_reference_batch(&settings)?;
//! println!("{} converted", report.success_count());
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod pipeline;

pub use config::{
    BASE_DATA_ENV, CHECKED_FOLDER_SUFFIX, ConvertConfig, ConvertSettings, checked_folder_for,
};
pub use error::{PipelineError, Result};
pub use hash::sha256_hex;
pub use pipeline::{
    BatchReport, TaskOutcome, TaskReport, process, process_with, run_reference_batch,
};
