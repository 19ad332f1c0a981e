//! Paginated filter/search view over evaluation records.
//!
//! [`ViewSession`] is the entry point for hosts: it loads documents through a
//! [`caseview_ingest::RecordStore`], derives the visible subset with the
//! filter engine and pages through it ten records at a time.

pub mod filter;
pub mod pagination;
pub mod session;

pub use filter::{FilterMode, FilterResult, FilterState, apply_filter, hit_options};
pub use pagination::{
    JumpSurface, JumpSurfaces, PAGE_SIZE, PageListener, PaginationController, total_pages_for,
};
pub use session::{PageSnapshot, PageView, ViewSession};
