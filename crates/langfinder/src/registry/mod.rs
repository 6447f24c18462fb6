//! registry module
//!
//! Static code tables and the JSON data boundaries (raw registry, corpus, tag groups).

pub mod code_registry;
pub mod data_loader;

/// Re-exports
pub use code_registry::CodeRegistry;
pub use data_loader::{
  load_corpus, load_known_codes, load_raw_registry, load_tag_groups, save_corpus, save_tag_groups,
};
