//! Document discovery in result folders.

use std::path::{Path, PathBuf};

use caseview_model::{DatasetProfile, DocumentFormat};

use crate::error::{IngestError, Result};

/// Prefix of editor lock files that sit next to open spreadsheets.
const LOCK_FILE_PREFIX: &str = "~$";

/// A document chosen for a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDocument {
    pub path: PathBuf,
    /// Number of files that matched the dataset keyword.
    pub candidates: usize,
}

impl DiscoveredDocument {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// Lists all workbook and CSV documents in a directory.
///
/// Lock files are skipped. Returns files sorted by name without extension;
/// when one export exists in both formats the workbook comes first.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX));
        if let Some(format) = DocumentFormat::from_path(&path)
            && !is_lock_file
        {
            files.push((format, path));
        }
    }

    files.sort_by(|(format_a, a), (format_b, b)| {
        a.file_stem()
            .cmp(&b.file_stem())
            .then(format_a.cmp(format_b))
    });
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Picks the document for `profile` in `folder`.
///
/// Keeps files whose name contains the profile keyword (case-insensitive) and
/// returns the first by name.
pub fn discover_document(folder: &Path, profile: &DatasetProfile) -> Result<DiscoveredDocument> {
    let matches: Vec<PathBuf> = list_documents(folder)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| profile.matches_file_name(name))
        })
        .collect();

    let candidates = matches.len();
    let Some(path) = matches.into_iter().next() else {
        return Err(IngestError::NoMatchingDocument {
            folder: folder.to_path_buf(),
            keyword: profile.keyword.clone(),
        });
    };

    if candidates > 1 {
        tracing::warn!(
            dataset = %profile.name,
            chosen = %path.display(),
            candidates,
            "several documents match dataset; using the first"
        );
    }
    Ok(DiscoveredDocument { path, candidates })
}
