// crates/langfinder/src/config.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::ConfigError;
use crate::models::LanguageField;

/// Lower bound of `search.writer_memory_bytes` (tantivy's per-thread minimum)
pub const MIN_WRITER_MEMORY: u64 = 15_000_000;

/// Upper bound of `search.writer_memory_bytes` (1GB)
pub const MAX_WRITER_MEMORY: u64 = 1_000_000_000;

/// Top-level configuration for langfinder.
///
/// Loaded from JSON. Only `[data]` is required; `[search]` and `[logging]` fall back to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LangFinderConfig {
  /// [data] section
  pub data: DataConfig,
  /// [search] section
  #[serde(default)]
  pub search: SearchConfig,
  /// [logging] section
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// [data] section configuration.
///
/// Either `corpus_path` (a persisted, already normalized corpus) or `raw_registry_path`
/// (normalized at startup) must be given. When both are set the persisted corpus wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
  /// Persisted corpus (JSON list of language records)
  #[serde(default)]
  pub corpus_path: Option<PathBuf>,
  /// Raw language-tag registry (JSON array)
  #[serde(default)]
  pub raw_registry_path: Option<PathBuf>,
  /// Script code → name table (JSON object)
  #[serde(default)]
  pub scripts_path: Option<PathBuf>,
  /// Region code → name table (JSON object)
  #[serde(default)]
  pub regions_path: Option<PathBuf>,
  /// Script code → sample text table (JSON object)
  #[serde(default)]
  pub script_samples_path: Option<PathBuf>,
  /// Known specific-language ISO 639-3 codes (JSON array)
  #[serde(default)]
  pub known_codes_path: Option<PathBuf>,
  /// Persisted tag groups (JSON list)
  #[serde(default)]
  pub tag_groups_path: Option<PathBuf>,
}

/// A record field eligible for matching, with its ranking weight.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SearchKey {
  /// Record field
  pub field: LanguageField,
  /// Ranking weight (boost), must be positive
  #[serde(default = "default_weight")]
  pub weight: f32,
}

impl SearchKey {
  /// Constructor for SearchKey
  pub fn new(field: LanguageField, weight: f32) -> Self {
    Self { field, weight }
  }
}

/// Default key weight
fn default_weight() -> f32 {
  1.0
}

/// Matching behaviour shared by the four match engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchTuning {
  /// Distinguish upper and lower case
  #[serde(default)]
  pub case_sensitive: bool,
  /// Fold diacritics (`é` matches `e`)
  #[serde(default = "default_true")]
  pub ignore_diacritics: bool,
  /// Trace-log per-tier scores (never exposed in results)
  #[serde(default)]
  pub include_score: bool,
}

impl Default for MatchTuning {
  fn default() -> Self {
    Self {
      case_sensitive: false,
      ignore_diacritics: true,
      include_score: false,
    }
  }
}

/// serde helper
fn default_true() -> bool {
  true
}

/// [search] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
  /// Fields for the complete, whole-word, start-of-word and substring tiers
  #[serde(default = "default_keys")]
  pub keys: Vec<SearchKey>,
  /// Fields for the fuzzy tier
  #[serde(default = "default_fuzzy_keys")]
  pub fuzzy_keys: Vec<SearchKey>,
  /// Matching behaviour
  #[serde(default)]
  pub tuning: MatchTuning,
  /// Default search result limit
  #[serde(default = "default_limit")]
  pub default_limit: usize,
  /// Maximum search result limit
  #[serde(default = "default_max_limit")]
  pub max_limit: usize,
  /// Memory budget of the IndexWriter used to build the in-memory index (bytes)
  #[serde(default = "default_writer_memory_bytes")]
  pub writer_memory_bytes: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      keys: default_keys(),
      fuzzy_keys: default_fuzzy_keys(),
      tuning: MatchTuning::default(),
      default_limit: default_limit(),
      max_limit: default_max_limit(),
      writer_memory_bytes: default_writer_memory_bytes(),
    }
  }
}

/// Default keys of the exact/substring/word-boundary tiers
pub fn default_keys() -> Vec<SearchKey> {
  vec![
    SearchKey::new(LanguageField::Exonym, 1.0),
    SearchKey::new(LanguageField::Autonym, 1.0),
    SearchKey::new(LanguageField::Code, 1.0),
    SearchKey::new(LanguageField::Names, 0.8),
    SearchKey::new(LanguageField::AlternativeTags, 0.6),
    SearchKey::new(LanguageField::RegionNames, 0.4),
  ]
}

/// Default keys of the fuzzy tier
pub fn default_fuzzy_keys() -> Vec<SearchKey> {
  vec![
    SearchKey::new(LanguageField::Exonym, 1.0),
    SearchKey::new(LanguageField::Autonym, 1.0),
    SearchKey::new(LanguageField::Names, 0.8),
  ]
}

fn default_limit() -> usize {
  20
}

fn default_max_limit() -> usize {
  200
}

fn default_writer_memory_bytes() -> usize {
  50_000_000
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  #[serde(default)]
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Directive string for `EnvFilter`
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl LoggingConfig {
  /// Installs the global `tracing` subscriber.
  ///
  /// `RUST_LOG` takes precedence over the configured level.
  /// Calling it twice is harmless (the second install is ignored).
  pub fn init_tracing(&self) {
    let filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()));

    let _ = tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer())
      .try_init();
  }
}

// ===== Loading & Accessor Methods =====

impl LangFinderConfig {
  /// Configuration that serves a persisted corpus with default search settings.
  pub fn with_corpus(corpus_path: impl Into<PathBuf>) -> Self {
    Self {
      data: DataConfig {
        corpus_path: Some(corpus_path.into()),
        ..DataConfig::default()
      },
      search: SearchConfig::default(),
      logging: LoggingConfig::default(),
    }
  }

  /// Parses a JSON configuration string.
  pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Parse(Arc::new(e)))
  }

  /// Reads and parses a JSON configuration file.
  pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
      path: path.to_path_buf(),
      source: Arc::new(e),
    })?;
    Self::from_json_str(&text)
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `search.keys` is not empty
  /// - every key weight is positive and finite
  /// - `search.default_limit` >= 1
  /// - `search.max_limit` >= `search.default_limit`
  /// - `search.writer_memory_bytes` is within allowable range (15MB - 1GB)
  /// - a corpus source (`data.corpus_path` or `data.raw_registry_path`) is set
  ///
  /// # Errors
  /// Returns the first `ConfigError` found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.search.keys.is_empty() {
      return Err(ConfigError::EmptySearchKeys);
    }

    for key in self.search.keys.iter().chain(&self.search.fuzzy_keys) {
      if !(key.weight.is_finite() && key.weight > 0.0) {
        return Err(ConfigError::InvalidKeyWeight {
          field: key.field,
          weight: key.weight,
        });
      }
    }

    if self.search.default_limit < 1 {
      return Err(ConfigError::InvalidSearchDefaultLimit {
        actual: self.search.default_limit,
      });
    }

    if self.search.max_limit < self.search.default_limit {
      return Err(ConfigError::InvalidSearchMaxLimit {
        default_limit: self.search.default_limit,
        max_limit: self.search.max_limit,
      });
    }

    let writer_memory = self.search.writer_memory_bytes as u64;
    if !(MIN_WRITER_MEMORY..=MAX_WRITER_MEMORY).contains(&writer_memory) {
      return Err(ConfigError::InvalidWriterMemoryBytes {
        min: MIN_WRITER_MEMORY,
        max: MAX_WRITER_MEMORY,
        actual: writer_memory,
      });
    }

    if self.data.corpus_path.is_none() && self.data.raw_registry_path.is_none() {
      return Err(ConfigError::MissingCorpusSource);
    }

    Ok(())
  }

  /// Clamps a requested limit into `1..=max_limit`, using `default_limit` when absent.
  pub fn effective_limit(&self, requested: Option<usize>) -> usize {
    requested.unwrap_or(self.search.default_limit).clamp(1, self.search.max_limit)
  }

  /// Returns the default search result limit.
  pub fn default_search_limit(&self) -> usize {
    self.search.default_limit
  }

  /// Returns the maximum search result limit.
  pub fn max_search_limit(&self) -> usize {
    self.search.max_limit
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
