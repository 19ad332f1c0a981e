//! In-memory record store with a per-path cache.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use caseview_model::{DatasetProfile, Record};

use crate::document::read_document;
use crate::error::Result;
use crate::schema::validate_records;

/// Validated records of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub dataset: String,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl LoadedDocument {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cache of loaded documents keyed by source path string.
///
/// Entries are only replaced when a different path string is loaded or the
/// entry is invalidated; edits on disk under the same path are not noticed.
#[derive(Debug, Default)]
pub struct RecordStore {
    cache: BTreeMap<String, Arc<LoadedDocument>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates `path` for `profile`, reusing a cached result.
    ///
    /// Failed loads are not cached.
    pub fn load(&mut self, profile: &DatasetProfile, path: &Path) -> Result<Arc<LoadedDocument>> {
        let key = cache_key(path);
        if let Some(cached) = self.cache.get(&key)
            && cached.dataset == profile.name
        {
            tracing::debug!(path = %key, "record store cache hit");
            return Ok(Arc::clone(cached));
        }

        tracing::debug!(path = %key, dataset = %profile.name, "record store cache miss");
        let document = read_document(path)?;
        let records = validate_records(path, &document, profile)?;
        let loaded = Arc::new(LoadedDocument {
            path: path.to_path_buf(),
            dataset: profile.name.clone(),
            columns: document.columns,
            records,
        });
        self.cache.insert(key, Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn get(&self, path: &Path) -> Option<Arc<LoadedDocument>> {
        self.cache.get(&cache_key(path)).cloned()
    }

    /// Drops the cached entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.cache.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn cache_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
