//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::LangFinderApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and service.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Language Lookup Service
  ///
  /// - Production: `Arc::new(LangFinderApiServiceFull::new(&library_config)?)`
  /// - Test: `Arc::new(StubLangFinderApiService)`
  pub service: Arc<dyn LangFinderApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn LangFinderApiService>) -> Self {
    Self { config, service }
  }
}
