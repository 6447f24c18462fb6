//! tags module
//!
//! Tag-group building and shortest-tag resolution.

pub mod shortest_tag;

/// Re-exports
pub use shortest_tag::{ShortestTagResolver, build_tag_groups};
