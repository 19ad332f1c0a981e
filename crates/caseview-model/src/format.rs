//! On-disk document formats.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Container format of a result document, chosen by file extension.
///
/// Ordered by preference: when the same export exists in several formats
/// the workbook wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Excel workbook; the first worksheet is the document.
    #[default]
    Xlsx,
    /// UTF-8 CSV with one header row.
    Csv,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Xlsx, DocumentFormat::Csv];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Csv => "csv",
        }
    }

    /// Format for a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
