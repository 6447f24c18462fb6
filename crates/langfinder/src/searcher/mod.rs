//! searcher module

pub mod incremental;
pub mod language_searcher;
pub mod options;
pub mod tier;
mod tokenization;

/// Re-exports
pub use incremental::{IncrementalSearch, TierBatch, TierSource, search_incremental};
pub use language_searcher::LanguageSearcher;
pub use options::{IdentityFn, PaddingFn, SearcherOptions, ValueExtractor};
pub use tier::SearchTier;
