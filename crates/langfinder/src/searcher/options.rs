//! Searcher construction options

use std::fmt;
use std::sync::Arc;

use crate::config::{
  MatchTuning, SearchConfig, SearchKey, default_fuzzy_keys, default_keys,
};
use crate::models::{LanguageField, LanguageRecord};

/// Identity used for cross-tier deduplication
pub type IdentityFn = Arc<dyn Fn(&LanguageRecord) -> String + Send + Sync>;

/// Custom extraction of a field's values from a record
pub type ValueExtractor = Arc<dyn Fn(&LanguageRecord, LanguageField) -> Vec<String> + Send + Sync>;

/// Custom padding of a value for the word-boundary tiers
pub type PaddingFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Default IndexWriter memory budget (bytes)
const DEFAULT_WRITER_MEMORY_BYTES: usize = 50_000_000;

/// Options of [`LanguageSearcher`](crate::searcher::LanguageSearcher).
///
/// The word-boundary tiers search for the query surrounded by single spaces,
/// so a custom `padding` must keep spaces as its word separators.
#[derive(Clone)]
pub struct SearcherOptions {
  /// Fields for the complete, whole-word, start-of-word and substring tiers
  pub keys: Vec<SearchKey>,

  /// Fields for the fuzzy tier
  pub fuzzy_keys: Vec<SearchKey>,

  /// Case / diacritics / score logging
  pub tuning: MatchTuning,

  /// Identity of a record (defaults to its code)
  pub identity: IdentityFn,

  /// Replaces [`LanguageField::values`] when set
  pub value_extractor: Option<ValueExtractor>,

  /// Replaces the default `" value "` padding when set
  pub padding: Option<PaddingFn>,

  /// IndexWriter memory budget (bytes)
  pub writer_memory_bytes: usize,
}

impl Default for SearcherOptions {
  fn default() -> Self {
    Self {
      keys: default_keys(),
      fuzzy_keys: default_fuzzy_keys(),
      tuning: MatchTuning::default(),
      identity: Arc::new(|record: &LanguageRecord| record.code.clone()),
      value_extractor: None,
      padding: None,
      writer_memory_bytes: DEFAULT_WRITER_MEMORY_BYTES,
    }
  }
}

impl fmt::Debug for SearcherOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SearcherOptions")
      .field("keys", &self.keys)
      .field("fuzzy_keys", &self.fuzzy_keys)
      .field("tuning", &self.tuning)
      .field("custom_value_extractor", &self.value_extractor.is_some())
      .field("custom_padding", &self.padding.is_some())
      .field("writer_memory_bytes", &self.writer_memory_bytes)
      .finish_non_exhaustive()
  }
}

impl SearcherOptions {
  /// Options taken from the `[search]` configuration section
  pub fn from_config(config: &SearchConfig) -> Self {
    Self {
      keys: config.keys.clone(),
      fuzzy_keys: config.fuzzy_keys.clone(),
      tuning: config.tuning,
      writer_memory_bytes: config.writer_memory_bytes,
      ..Self::default()
    }
  }

  /// Builder that replaces the identity function
  #[must_use]
  pub fn with_identity<F>(mut self, identity: F) -> Self
  where
    F: Fn(&LanguageRecord) -> String + Send + Sync + 'static,
  {
    self.identity = Arc::new(identity);
    self
  }

  /// Builder that installs a custom value extractor
  #[must_use]
  pub fn with_value_extractor<F>(mut self, extractor: F) -> Self
  where
    F: Fn(&LanguageRecord, LanguageField) -> Vec<String> + Send + Sync + 'static,
  {
    self.value_extractor = Some(Arc::new(extractor));
    self
  }

  /// Builder that installs a custom padding function
  #[must_use]
  pub fn with_padding<F>(mut self, padding: F) -> Self
  where
    F: Fn(&str) -> String + Send + Sync + 'static,
  {
    self.padding = Some(Arc::new(padding));
    self
  }

  /// Values of `field` for `record`
  pub(crate) fn values(&self, record: &LanguageRecord, field: LanguageField) -> Vec<String> {
    match &self.value_extractor {
      Some(extract) => extract(record, field).into_iter().filter(|v| !v.is_empty()).collect(),
      None => field.values(record),
    }
  }

  /// Padded shadow copy of a value
  pub(crate) fn pad(&self, value: &str) -> String {
    match &self.padding {
      Some(pad) => pad(value),
      None => format!(" {value} "),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_use_code_identity_and_space_padding() {
    let options = SearcherOptions::default();
    let record = LanguageRecord::new("fra", "French");

    assert_eq!((options.identity)(&record), "fra");
    assert_eq!(options.pad("French"), " French ");
    assert_eq!(options.values(&record, LanguageField::Exonym), vec!["French".to_string()]);
  }

  #[test]
  fn custom_functions_replace_defaults() {
    let options = SearcherOptions::default()
      .with_identity(|r| r.exonym.to_lowercase())
      .with_padding(|v| format!(" {} ", v.replace('-', " ")))
      .with_value_extractor(|r, field| match field {
        LanguageField::Exonym => vec![r.exonym.clone(), String::new()],
        _ => Vec::new(),
      });
    let record = LanguageRecord::new("tpi", "Tok Pisin");

    assert_eq!((options.identity)(&record), "tok pisin");
    assert_eq!(options.pad("Saint-Martin"), " Saint Martin ");
    // Empty extracted values are dropped
    assert_eq!(options.values(&record, LanguageField::Exonym), vec!["Tok Pisin".to_string()]);
    assert!(options.values(&record, LanguageField::Code).is_empty());
  }

  #[test]
  fn from_config_copies_search_section() {
    let config = SearchConfig {
      keys: vec![SearchKey::new(LanguageField::Code, 3.0)],
      writer_memory_bytes: 20_000_000,
      ..SearchConfig::default()
    };

    let options = SearcherOptions::from_config(&config);
    assert_eq!(options.keys, config.keys);
    assert_eq!(options.writer_memory_bytes, 20_000_000);
  }
}
