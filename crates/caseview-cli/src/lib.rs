//! CLI library components for the case viewer.

pub mod browse;
pub mod logging;
pub mod render;
