//! Viewing session: the query surface a renderer talks to.
//!
//! Every interaction runs one synchronous pass (filter, then pagination) and
//! returns the resulting [`PageSnapshot`]. Load problems come back as
//! [`LoadFailure`] values; the session stays usable after one.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use caseview_ingest::{LoadErrorKind, LoadFailure, LoadedDocument, RecordStore};
use caseview_model::{DatasetProfile, HitValue, Record, find_profile};

use crate::filter::{FilterMode, FilterState, apply_filter, hit_options};
use crate::pagination::{JumpSurface, JumpSurfaces, PageListener, PaginationController};

/// Page and filter state after an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub page_index: usize,
    pub total_pages: usize,
    pub visible_count: usize,
    pub total_count: usize,
    pub surfaces: JumpSurfaces,
    pub mode: FilterMode,
}

/// One page of records ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub dataset: Option<String>,
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub snapshot: PageSnapshot,
    /// Set when a search matched nothing.
    pub notice: Option<String>,
}

/// Per-session view state over one loaded document at a time.
#[derive(Debug, Default)]
pub struct ViewSession {
    store: RecordStore,
    current: Option<Arc<LoadedDocument>>,
    filter: FilterState,
    pager: PaginationController,
    visible: Vec<usize>,
    notice: Option<String>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: RecordStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Loads the document for `dataset` at `path` and returns its current page.
    pub fn list_page(&mut self, dataset: &str, path: &Path) -> Result<PageView, LoadFailure> {
        let profile = find_profile(dataset).map_err(|e| LoadFailure {
            kind: LoadErrorKind::NotFound,
            message: e.to_string(),
        })?;
        self.open(&profile, path)?;
        Ok(self.current_page())
    }

    /// Makes `path` the current document.
    ///
    /// Opening a different document resets filter and page state; reopening
    /// the cached one keeps them.
    pub fn open(
        &mut self,
        profile: &DatasetProfile,
        path: &Path,
    ) -> Result<PageSnapshot, LoadFailure> {
        let loaded = self.store.load(profile, path).map_err(LoadFailure::from)?;
        let same_document = self
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &loaded));
        if !same_document {
            debug!(
                dataset = %loaded.dataset,
                path = %path.display(),
                "document changed; resetting view state"
            );
            self.current = Some(loaded);
            self.filter.reset();
            self.pager.go_to_page(0);
        }
        Ok(self.refresh())
    }

    /// Drops the cached copy of `path`, closing it when it is current.
    pub fn invalidate(&mut self, path: &Path) {
        self.store.invalidate(path);
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.path == path)
        {
            self.current = None;
            self.filter.reset();
            self.refresh();
        }
    }

    pub fn current_document(&self) -> Option<&Arc<LoadedDocument>> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn subscribe(&mut self, listener: Box<dyn PageListener>) {
        self.pager.subscribe(listener);
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Distinct hit values of the current document.
    pub fn hit_options(&self) -> Vec<HitValue> {
        self.records().map(hit_options).unwrap_or_default()
    }

    pub fn set_filter(&mut self, mode: FilterMode) -> PageSnapshot {
        self.filter.set_mode(mode);
        self.refresh()
    }

    pub fn set_hit_filter<I>(&mut self, values: I) -> PageSnapshot
    where
        I: IntoIterator<Item = HitValue>,
    {
        self.filter.set_hit_selection(values);
        self.refresh()
    }

    pub fn clear_hit_filter(&mut self) -> PageSnapshot {
        self.filter.clear_hit_selection();
        self.refresh()
    }

    pub fn search(&mut self, term: &str) -> PageSnapshot {
        self.filter.set_search(term);
        self.refresh()
    }

    pub fn clear_search(&mut self) -> PageSnapshot {
        self.filter.clear_search();
        self.refresh()
    }

    pub fn go_to_page(&mut self, page: usize) -> PageSnapshot {
        self.pager.go_to_page(page);
        self.snapshot()
    }

    pub fn next(&mut self) -> PageSnapshot {
        self.pager.next();
        self.snapshot()
    }

    pub fn prev(&mut self) -> PageSnapshot {
        self.pager.prev();
        self.snapshot()
    }

    /// Applies a 1-based page number typed into one of the jump inputs.
    pub fn jump_from(&mut self, surface: JumpSurface, value: i64) -> PageSnapshot {
        self.pager.jump_from(surface, value);
        self.snapshot()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            page_index: self.pager.page_index(),
            total_pages: self.pager.total_pages(),
            visible_count: self.pager.visible_count(),
            total_count: self.records().map_or(0, <[Record]>::len),
            surfaces: self.pager.surfaces(),
            mode: self.filter.mode(),
        }
    }

    /// Records of the current page.
    pub fn current_page(&self) -> PageView {
        let records = match self.records() {
            Some(records) => self.visible[self.pager.page_range()]
                .iter()
                .filter_map(|&position| records.get(position).cloned())
                .collect(),
            None => Vec::new(),
        };
        PageView {
            dataset: self.current.as_ref().map(|doc| doc.dataset.clone()),
            records,
            snapshot: self.snapshot(),
            notice: self.notice.clone(),
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn records(&self) -> Option<&[Record]> {
        self.current.as_ref().map(|doc| doc.records.as_slice())
    }

    fn refresh(&mut self) -> PageSnapshot {
        let mode = self.filter.mode();
        let result = self.records().map(|records| apply_filter(records, &mode));
        let (visible, notice) = match result {
            Some(result) => (result.indices, result.notice),
            None => (Vec::new(), None),
        };
        debug!(mode = ?mode, visible = visible.len(), "filter applied");
        self.visible = visible;
        self.notice = notice;
        self.pager.on_filter_changed(self.visible.len(), mode.is_search());
        self.snapshot()
    }
}
