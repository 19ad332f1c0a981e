//! Image path resolution for evaluation exports.
//!
//! Each dataset profile names one [`caseview_model::PathStrategyKind`];
//! [`resolve`] dispatches on it and never fails.

pub mod list_literal;
pub mod resolver;

pub use list_literal::{looks_like_list, parse_list_literal};
pub use resolver::{
    PathResolution, ResolutionKind, apply, prefix_path, resolve, resolve_image_paths,
};
