//! Data model for evaluation case viewing.
//!
//! Raw documents ([`Document`], [`RawRecord`], [`CellValue`]) are what the
//! conversion pipeline reads and writes; [`Record`] is the validated form the
//! viewer works with. [`DatasetProfile`] describes one supported dataset.

pub mod cell;
pub mod error;
pub mod format;
pub mod profile;
pub mod profiles;
pub mod record;

pub use cell::{CellValue, Document, RawRecord, format_numeric};
pub use error::{ModelError, Result};
pub use format::DocumentFormat;
pub use profile::{
    ConversionTask, DatasetProfile, IMAGE_PATH_COLUMN, INDEX_COLUMN, PathStrategyKind,
};
pub use profiles::{DEFAULT_MODEL_PREFIX, builtin_profiles, conversion_tasks, find_profile};
pub use record::{HitValue, OPTION_LABELS, Record};
