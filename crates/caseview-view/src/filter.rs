//! Filter and search over loaded records.
//!
//! The active [`FilterMode`] is derived from two inputs: the categorical hit
//! selection and the search term. A non-empty search term always wins; the
//! hit selection is kept while searching and applies again once the term is
//! cleared. An empty hit selection means no filter.

use std::collections::BTreeSet;

use serde::Serialize;

use caseview_model::{HitValue, Record};

/// Which subset of records is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterMode {
    All,
    HitFilter(BTreeSet<HitValue>),
    Search(String),
}

impl FilterMode {
    pub fn is_search(&self) -> bool {
        matches!(self, FilterMode::Search(_))
    }
}

/// Filter inputs as the operator set them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    hit_selection: BTreeSet<HitValue>,
    search_term: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode. Search takes precedence over the hit selection.
    pub fn mode(&self) -> FilterMode {
        if let Some(term) = self.search_term() {
            FilterMode::Search(term.to_string())
        } else if self.hit_selection.is_empty() {
            FilterMode::All
        } else {
            FilterMode::HitFilter(self.hit_selection.clone())
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn hit_selection(&self) -> &BTreeSet<HitValue> {
        &self.hit_selection
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn set_hit_selection<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = HitValue>,
    {
        self.hit_selection = values.into_iter().collect();
    }

    pub fn clear_hit_selection(&mut self) {
        self.hit_selection.clear();
    }

    /// Replaces both inputs so that `mode` becomes the active mode.
    pub fn set_mode(&mut self, mode: FilterMode) {
        match mode {
            FilterMode::All => {
                self.clear_search();
                self.clear_hit_selection();
            }
            FilterMode::HitFilter(values) => {
                self.clear_search();
                self.hit_selection = values;
            }
            FilterMode::Search(term) => self.search_term = term,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Visible subset computed for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    /// Positions into the record slice, in document order.
    pub indices: Vec<usize>,
    /// Operator-facing notice, set when a search matched nothing.
    pub notice: Option<String>,
}

/// Computes the visible positions of `records` under `mode`.
pub fn apply_filter(records: &[Record], mode: &FilterMode) -> FilterResult {
    match mode {
        FilterMode::All => FilterResult {
            indices: (0..records.len()).collect(),
            notice: None,
        },
        FilterMode::HitFilter(values) if values.is_empty() => {
            apply_filter(records, &FilterMode::All)
        }
        FilterMode::HitFilter(values) => FilterResult {
            indices: positions(records, |record| values.contains(&record.hit)),
            notice: None,
        },
        FilterMode::Search(term) => {
            let term = term.trim();
            let indices = positions(records, |record| record.index.trim() == term);
            let notice = indices
                .is_empty()
                .then(|| format!("no record with index '{term}'"));
            FilterResult { indices, notice }
        }
    }
}

fn positions<F>(records: &[Record], keep: F) -> Vec<usize>
where
    F: Fn(&Record) -> bool,
{
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| keep(record))
        .map(|(position, _)| position)
        .collect()
}

/// Distinct hit values present in `records`, sorted.
///
/// A boolean column always offers both values.
pub fn hit_options(records: &[Record]) -> Vec<HitValue> {
    let mut values: BTreeSet<HitValue> = records.iter().map(|r| r.hit.clone()).collect();
    if values.iter().any(HitValue::is_bool) {
        values.insert(HitValue::Bool(false));
        values.insert(HitValue::Bool(true));
    }
    values.into_iter().collect()
}
