//! Page state over a visible record subset.
//!
//! One [`PaginationController`] owns the page index. Both jump inputs (above
//! and below the record list) only mirror it: every transition ends in
//! [`PaginationController::publish`], which writes `page_index + 1` to both
//! surfaces and notifies listeners.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Records shown per page.
pub const PAGE_SIZE: usize = 10;

/// One of the two jump inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpSurface {
    Top,
    Bottom,
}

/// Values displayed by the jump inputs (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpSurfaces {
    pub top: usize,
    pub bottom: usize,
}

impl JumpSurfaces {
    pub fn get(&self, surface: JumpSurface) -> usize {
        match surface {
            JumpSurface::Top => self.top,
            JumpSurface::Bottom => self.bottom,
        }
    }
}

/// Observer of page changes, typically a host widget.
pub trait PageListener {
    fn page_changed(&mut self, surfaces: JumpSurfaces);
}

impl<F> PageListener for F
where
    F: FnMut(JumpSurfaces),
{
    fn page_changed(&mut self, surfaces: JumpSurfaces) {
        self(surfaces);
    }
}

/// Number of pages needed for `visible_count` records; never zero.
pub fn total_pages_for(visible_count: usize) -> usize {
    visible_count.div_ceil(PAGE_SIZE).max(1)
}

/// Authoritative page state plus its two mirrored jump inputs.
pub struct PaginationController {
    page_index: usize,
    visible_count: usize,
    surfaces: JumpSurfaces,
    listeners: Vec<Box<dyn PageListener>>,
}

impl fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationController")
            .field("page_index", &self.page_index)
            .field("visible_count", &self.visible_count)
            .field("surfaces", &self.surfaces)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PaginationController {
    pub fn new(visible_count: usize) -> Self {
        Self {
            page_index: 0,
            visible_count,
            surfaces: JumpSurfaces { top: 1, bottom: 1 },
            listeners: Vec::new(),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn total_pages(&self) -> usize {
        total_pages_for(self.visible_count)
    }

    pub fn surfaces(&self) -> JumpSurfaces {
        self.surfaces
    }

    pub fn subscribe(&mut self, listener: Box<dyn PageListener>) {
        self.listeners.push(listener);
    }

    /// Moves to page `page` (0-based). Out of range is a no-op.
    ///
    /// Returns whether the page index was accepted.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.total_pages() {
            tracing::debug!(page, total_pages = self.total_pages(), "page out of range");
            return false;
        }
        self.page_index = page;
        self.publish();
        true
    }

    pub fn next(&mut self) {
        if self.page_index + 1 < self.total_pages() {
            self.page_index += 1;
        }
        self.publish();
    }

    pub fn prev(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
        self.publish();
    }

    /// Applies a 1-based page number typed into one of the jump inputs.
    ///
    /// Invalid entries leave the page as is and re-publish it, so the edited
    /// surface shows the current page again.
    pub fn jump_from(&mut self, surface: JumpSurface, value: i64) -> bool {
        let accepted = usize::try_from(value)
            .ok()
            .and_then(|value| value.checked_sub(1))
            .is_some_and(|page| self.go_to_page(page));
        if !accepted {
            tracing::debug!(?surface, value, "jump rejected");
            self.publish();
        }
        accepted
    }

    /// Recomputes bounds after the visible subset changed.
    ///
    /// Entering search always returns to the first page; otherwise the page
    /// is kept unless it no longer exists.
    pub fn on_filter_changed(&mut self, visible_count: usize, search_active: bool) {
        self.visible_count = visible_count;
        if search_active || self.page_index >= self.total_pages() {
            self.page_index = 0;
        }
        self.publish();
    }

    /// Offsets of the current page within the visible subset.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.page_index * PAGE_SIZE).min(self.visible_count);
        let end = (start + PAGE_SIZE).min(self.visible_count);
        start..end
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages()
    }

    /// Writes the current page to both surfaces and notifies listeners.
    pub fn publish(&mut self) {
        let display = self.page_index + 1;
        self.surfaces = JumpSurfaces {
            top: display,
            bottom: display,
        };
        for listener in &mut self.listeners {
            listener.page_changed(self.surfaces);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn bounds_for_twenty_three_records() {
        let mut pager = PaginationController::new(23);
        assert_eq!(pager.total_pages(), 3);

        assert!(!pager.go_to_page(5));
        assert_eq!(pager.page_index(), 0);

        pager.prev();
        assert_eq!(pager.page_index(), 0);

        pager.go_to_page(2);
        assert_eq!(pager.page_range(), 20..23);
        pager.next();
        assert_eq!(pager.page_index(), 2);
        assert!(!pager.has_next());
    }

    #[test]
    fn empty_subset_still_has_one_page() {
        let pager = PaginationController::new(0);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.page_range(), 0..0);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
    }

    #[test]
    fn jump_is_one_based_and_invalid_jump_snaps_back() {
        let mut pager = PaginationController::new(35);
        assert!(pager.jump_from(JumpSurface::Bottom, 4));
        assert_eq!(pager.page_index(), 3);
        assert_eq!(pager.surfaces(), JumpSurfaces { top: 4, bottom: 4 });

        assert!(!pager.jump_from(JumpSurface::Top, 0));
        assert!(!pager.jump_from(JumpSurface::Top, 9));
        assert!(!pager.jump_from(JumpSurface::Top, -2));
        assert_eq!(pager.surfaces().get(JumpSurface::Top), 4);
    }

    #[test]
    fn filter_change_resets_out_of_range_page() {
        let mut pager = PaginationController::new(50);
        pager.go_to_page(4);
        pager.on_filter_changed(45, false);
        assert_eq!(pager.page_index(), 4);
        pager.on_filter_changed(12, false);
        assert_eq!(pager.page_index(), 0);

        pager.go_to_page(1);
        pager.on_filter_changed(12, true);
        assert_eq!(pager.page_index(), 0);
    }

    #[test]
    fn listeners_see_every_publish() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut pager = PaginationController::new(30);
        pager.subscribe(Box::new(move |surfaces: JumpSurfaces| {
            sink.borrow_mut().push(surfaces.top);
        }));

        pager.next();
        pager.next();
        pager.prev();
        assert_eq!(*seen.borrow(), vec![2, 3, 2]);
    }
}
