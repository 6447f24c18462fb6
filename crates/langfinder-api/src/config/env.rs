//! Config loading from environment variables

use std::path::PathBuf;

use langfinder::LangFinderConfig;

use super::constants::{DEFAULT_BIND_ADDR, DEFAULT_CORPUS_PATH};
use crate::errors::{ApiError, Result};

/// Bind address
pub const ENV_BASE_URL: &str = "LANGFINDER_API_BASE_URL";
/// Library configuration file (JSON)
pub const ENV_CONFIG: &str = "LANGFINDER_CONFIG";
/// Persisted corpus, overrides `data.corpus_path`
pub const ENV_CORPUS_PATH: &str = "LANGFINDER_CORPUS_PATH";
/// Persisted tag groups, overrides `data.tag_groups_path`
pub const ENV_TAG_GROUPS_PATH: &str = "LANGFINDER_TAG_GROUPS_PATH";

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:5530")
  pub bind_addr: String,
  /// Library configuration file
  pub config_path: Option<PathBuf>,
  /// Corpus override
  pub corpus_path: Option<PathBuf>,
  /// Tag groups override
  pub tag_groups_path: Option<PathBuf>,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Never fails today; kept fallible like the other loaders.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary variable lookup
  ///
  /// Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let bind_addr = var(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    Ok(Self {
      bind_addr,
      config_path: var(ENV_CONFIG).map(PathBuf::from),
      corpus_path: var(ENV_CORPUS_PATH).map(PathBuf::from),
      tag_groups_path: var(ENV_TAG_GROUPS_PATH).map(PathBuf::from),
    })
  }

  /// Builds the library configuration
  ///
  /// The configuration file is the base when given; otherwise the corpus at
  /// `LANGFINDER_CORPUS_PATH` (or `data/corpus.json`) is served with default
  /// search settings. Path variables override the file.
  ///
  /// # Errors
  /// Returns an error if the configuration file cannot be read or parsed
  pub fn library_config(&self) -> Result<LangFinderConfig> {
    let mut config = match &self.config_path {
      Some(path) => {
        LangFinderConfig::from_json_file(path).map_err(|e| ApiError::config(e.to_string()))?
      }
      None => LangFinderConfig::with_corpus(DEFAULT_CORPUS_PATH),
    };

    if let Some(path) = &self.corpus_path {
      config.data.corpus_path = Some(path.clone());
    }
    if let Some(path) = &self.tag_groups_path {
      config.data.tag_groups_path = Some(path.clone());
    }

    Ok(config)
  }
}
