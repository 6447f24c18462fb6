//! Language Lookup Service

use std::time::Instant;

use langfinder::{LangFinderConfig, LangFinderService, LanguageRecord};
use tracing::debug;

use crate::config::{MAX_QUERY_LENGTH, MAX_TEXT_LENGTH, MIN_QUERY_CHARS};
use crate::errors::{ApiError, Result};
use crate::models::{
  HighlightRequest, HighlightResponse, SearchRequest, SearchResponse, TagResponse, TierBatchDto,
  TieredSearchResponse,
};

/// Common interface for the language lookup service
///
/// This trait allows swapping production implementation (`LangFinderApiServiceFull`) with
/// test stubs/mocks.
pub trait LangFinderApiService: Send + Sync {
  /// Searches the corpus, all tiers merged
  ///
  /// # Errors
  /// - Input error (query too long)
  fn search(&self, request: SearchRequest) -> Result<SearchResponse>;

  /// Searches the corpus, one batch per tier
  ///
  /// # Errors
  /// - Input error (query too long)
  fn search_tiers(&self, request: SearchRequest) -> Result<TieredSearchResponse>;

  /// Splits a display string around the query
  ///
  /// # Errors
  /// - Input error (query or text too long)
  fn highlight(&self, request: HighlightRequest) -> Result<HighlightResponse>;

  /// Resolves a tag to its shortest equivalent
  ///
  /// # Errors
  /// - Input error (empty tag)
  fn resolve_tag(&self, tag: &str) -> Result<TagResponse>;

  /// Looks up one record by code
  ///
  /// # Errors
  /// - Not found
  fn language(&self, code: &str) -> Result<LanguageRecord>;
}

/// Checks a query against the length limits
///
/// Returns `false` for queries under the minimum length: those are answered
/// with an empty result instead of an error.
///
/// # Errors
/// If the query exceeds [`MAX_QUERY_LENGTH`] characters
pub fn check_query(query: &str) -> Result<bool> {
  let chars = query.chars().count();
  if chars > MAX_QUERY_LENGTH {
    return Err(ApiError::text_too_long(chars, MAX_QUERY_LENGTH));
  }
  Ok(query.trim().chars().count() >= MIN_QUERY_CHARS)
}

/// Language Lookup Service
///
/// Thin wrapper around `LangFinderService` adding input limits and timing.
#[derive(Debug)]
pub struct LangFinderApiServiceFull {
  /// Library facade
  inner: LangFinderService,
}

impl LangFinderApiServiceFull {
  /// Initializes the service
  ///
  /// # Arguments
  /// * `config` - Library configuration
  ///
  /// # Errors
  /// Returns an error if data loading or index construction fails
  pub fn new(config: &LangFinderConfig) -> Result<Self> {
    let inner = LangFinderService::init(config)?;
    Ok(Self { inner })
  }

  /// Wraps an already initialized library service
  #[must_use]
  pub fn from_service(inner: LangFinderService) -> Self {
    Self { inner }
  }

  /// Searches the corpus, all tiers merged
  ///
  /// # Errors
  /// If the query exceeds the maximum length
  pub fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
    let start = Instant::now();

    let results = if check_query(&request.query)? {
      self.inner.search(&request.query, request.limit).into_iter().cloned().collect()
    } else {
      debug!(query = %request.query, "Query below minimum length");
      Vec::new()
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    Ok(SearchResponse { results, elapsed_ms })
  }

  /// Searches the corpus, one batch per tier
  ///
  /// # Errors
  /// If the query exceeds the maximum length
  pub fn search_tiers(&self, request: SearchRequest) -> Result<TieredSearchResponse> {
    let start = Instant::now();

    let batches = if check_query(&request.query)? {
      self
        .inner
        .search_tiers(&request.query, request.limit)
        .into_iter()
        .map(TierBatchDto::from)
        .collect()
    } else {
      Vec::new()
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    Ok(TieredSearchResponse { batches, elapsed_ms })
  }

  /// Splits a display string around the query
  ///
  /// # Errors
  /// If the query or the text exceeds its maximum length
  pub fn highlight(&self, request: HighlightRequest) -> Result<HighlightResponse> {
    check_query(&request.query)?;

    let text_chars = request.text.chars().count();
    if text_chars > MAX_TEXT_LENGTH {
      return Err(ApiError::text_too_long(text_chars, MAX_TEXT_LENGTH));
    }

    Ok(HighlightResponse {
      segments: self.inner.highlight(&request.query, &request.text),
    })
  }

  /// Resolves a tag to its shortest equivalent
  ///
  /// # Errors
  /// If the tag is empty
  pub fn resolve_tag(&self, tag: &str) -> Result<TagResponse> {
    if tag.trim().is_empty() {
      return Err(ApiError::invalid_input("Tag is empty"));
    }

    Ok(TagResponse {
      tag: tag.to_string(),
      shortest: self.inner.resolve_tag(tag).to_string(),
    })
  }

  /// Looks up one record by code
  ///
  /// # Errors
  /// If no record has this code
  pub fn language(&self, code: &str) -> Result<LanguageRecord> {
    self
      .inner
      .record(code)
      .cloned()
      .ok_or_else(|| ApiError::not_found(format!("language code `{code}`")))
  }
}

/// Production implementation of trait `LangFinderApiService`
///
/// Note: Writing `self.search(...)` would recursively call the trait method,
/// so the inherent methods are called explicitly.
impl LangFinderApiService for LangFinderApiServiceFull {
  fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
    LangFinderApiServiceFull::search(self, request)
  }

  fn search_tiers(&self, request: SearchRequest) -> Result<TieredSearchResponse> {
    LangFinderApiServiceFull::search_tiers(self, request)
  }

  fn highlight(&self, request: HighlightRequest) -> Result<HighlightResponse> {
    LangFinderApiServiceFull::highlight(self, request)
  }

  fn resolve_tag(&self, tag: &str) -> Result<TagResponse> {
    LangFinderApiServiceFull::resolve_tag(self, tag)
  }

  fn language(&self, code: &str) -> Result<LanguageRecord> {
    LangFinderApiServiceFull::language(self, code)
  }
}
