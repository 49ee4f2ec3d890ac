//! Transformation module.
//!
//! - Grouper: rows to per-state groups, sorted by matriculation number
//! - Pipeline: load, group and write in one call

pub mod grouper;
pub mod pipeline;

pub use grouper::{group_and_sort, is_blank_key, Groups};
pub use pipeline::*;
