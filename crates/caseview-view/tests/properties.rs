//! Property-based tests for the filter engine and pagination controller.

use std::collections::BTreeSet;

use proptest::prelude::*;

use caseview_model::{HitValue, Record};
use caseview_view::{
    FilterMode, JumpSurface, PAGE_SIZE, PaginationController, apply_filter, hit_options,
};

fn record(index: String, hit: HitValue) -> Record {
    Record {
        index,
        question: String::new(),
        options: Default::default(),
        answer: String::new(),
        prediction: String::new(),
        extracted: None,
        hit,
        image_paths: Vec::new(),
    }
}

fn hit_strategy() -> impl Strategy<Value = HitValue> {
    prop_oneof![
        Just(HitValue::Missing),
        any::<bool>().prop_map(HitValue::Bool),
        (0i64..3).prop_map(HitValue::Int),
    ]
}

/// Records with unique indices `0..n`.
fn unique_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(hit_strategy(), 0..60).prop_map(|hits| {
        hits.into_iter()
            .enumerate()
            .map(|(position, hit)| record(position.to_string(), hit))
            .collect()
    })
}

/// Records whose indices may repeat.
fn repeating_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(("[0-9]{1,2}", hit_strategy()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(index, hit)| record(index, hit))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum PageOp {
    Next,
    Prev,
    GoTo(usize),
    Jump(bool, i64),
    Filter(usize, bool),
}

fn page_op() -> impl Strategy<Value = PageOp> {
    prop_oneof![
        Just(PageOp::Next),
        Just(PageOp::Prev),
        (0usize..10).prop_map(PageOp::GoTo),
        (any::<bool>(), -2i64..12).prop_map(|(top, value)| PageOp::Jump(top, value)),
        (0usize..80, any::<bool>()).prop_map(|(count, search)| PageOp::Filter(count, search)),
    ]
}

proptest! {
    /// Property: an empty hit selection shows the same records as no filter.
    #[test]
    fn prop_empty_hit_filter_is_all(records in unique_records()) {
        let all = apply_filter(&records, &FilterMode::All);
        let empty = apply_filter(&records, &FilterMode::HitFilter(BTreeSet::new()));
        prop_assert_eq!(all, empty);
    }

    /// Property: a selection excluding some observed value hides those records.
    #[test]
    fn prop_hit_filter_shrinks_visible_set(
        records in unique_records(),
        mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let observed = hit_options(&records);
        let selection: BTreeSet<HitValue> = observed
            .iter()
            .zip(mask.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(value, _)| value.clone())
            .collect();
        prop_assume!(!selection.is_empty());

        let visible = apply_filter(&records, &FilterMode::HitFilter(selection.clone())).indices;
        let expected = records.iter().filter(|r| selection.contains(&r.hit)).count();
        prop_assert_eq!(visible.len(), expected);

        if records.iter().any(|r| !selection.contains(&r.hit)) {
            prop_assert!(visible.len() < records.len());
        }
    }

    /// Property: search selects exactly the records whose trimmed index matches.
    #[test]
    fn prop_search_is_exact_match(records in repeating_records(), term in "[ ]{0,2}[0-9]{1,2}[ ]{0,2}") {
        let result = apply_filter(&records, &FilterMode::Search(term.clone()));
        let expected: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.index.trim() == term.trim())
            .map(|(position, _)| position)
            .collect();
        prop_assert_eq!(&result.indices, &expected);
        prop_assert_eq!(result.notice.is_some(), expected.is_empty());
    }

    /// Property: searching an index taken from the document finds exactly one record.
    #[test]
    fn prop_search_listed_index_finds_one(records in unique_records(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!records.is_empty());
        let index = records[pick.index(records.len())].index.clone();
        let result = apply_filter(&records, &FilterMode::Search(index));
        prop_assert_eq!(result.indices.len(), 1);
    }

    /// Property: page bounds and both jump inputs stay consistent after any sequence.
    #[test]
    fn prop_pagination_invariants(initial in 0usize..80, ops in prop::collection::vec(page_op(), 0..40)) {
        let mut pager = PaginationController::new(initial);
        for op in ops {
            let before = pager.page_index();
            match op {
                PageOp::Next => pager.next(),
                PageOp::Prev => pager.prev(),
                PageOp::GoTo(page) => {
                    let accepted = pager.go_to_page(page);
                    prop_assert_eq!(accepted, page < pager.total_pages());
                    if !accepted {
                        prop_assert_eq!(pager.page_index(), before);
                    }
                }
                PageOp::Jump(top, value) => {
                    let surface = if top { JumpSurface::Top } else { JumpSurface::Bottom };
                    pager.jump_from(surface, value);
                }
                PageOp::Filter(count, search) => {
                    pager.on_filter_changed(count, search);
                    if search {
                        prop_assert_eq!(pager.page_index(), 0);
                    }
                }
            }

            let page = pager.page_index();
            prop_assert!(page < pager.total_pages());
            prop_assert_eq!(pager.total_pages(), pager.visible_count().div_ceil(PAGE_SIZE).max(1));
            let surfaces = pager.surfaces();
            prop_assert_eq!(surfaces.top, page + 1);
            prop_assert_eq!(surfaces.bottom, page + 1);
            prop_assert!(pager.page_range().len() <= PAGE_SIZE);
        }
    }
}
