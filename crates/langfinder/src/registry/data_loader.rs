//! Data file loading and persistence
//!
//! JSON boundaries of the crate: the raw registry consumed by the normalizer,
//! the persisted corpus and the persisted tag groups.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::DataError;
use crate::models::{LanguageRecord, RawRegistryEntry, TagGroup};

/// Reads a file and decodes it as JSON
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
  let bytes = std::fs::read(path).map_err(|e| DataError::ReadFailed {
    path: path.to_path_buf(),
    source: Arc::new(e),
  })?;

  serde_json::from_slice(&bytes).map_err(|e| DataError::Parse {
    path: path.to_path_buf(),
    source: Arc::new(e),
  })
}

/// Encodes a value as pretty JSON (with trailing newline) and writes it
fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DataError> {
  let mut text =
    serde_json::to_string_pretty(value).map_err(|e| DataError::Serialize(Arc::new(e)))?;
  text.push('\n');

  std::fs::write(path, text).map_err(|e| DataError::WriteFailed {
    path: path.to_path_buf(),
    source: Arc::new(e),
  })
}

/// Loads the raw language-tag registry.
///
/// Each array element is decoded on its own. Elements that do not decode as a
/// [`RawRegistryEntry`] are registry metadata and are skipped, never fatal.
///
/// # Errors
/// - IO failure, invalid JSON, or a top-level value that is not an array
pub fn load_raw_registry<P: AsRef<Path>>(path: P) -> Result<Vec<RawRegistryEntry>, DataError> {
  let path = path.as_ref();
  let document: serde_json::Value = load_json(path)?;

  let serde_json::Value::Array(rows) = document else {
    return Err(DataError::RegistryNotAnArray(path.to_path_buf()));
  };

  let total = rows.len();
  let entries: Vec<RawRegistryEntry> = rows
    .into_iter()
    .enumerate()
    .filter_map(|(row, value)| match serde_json::from_value(value) {
      Ok(entry) => Some(entry),
      Err(e) => {
        debug!(row, error = %e, "Skipping undecodable registry row");
        None
      }
    })
    .collect();

  info!(path = ?path, total, decoded = entries.len(), "Raw registry loaded");
  Ok(entries)
}

/// Loads the set of known specific-language ISO 639-3 codes (JSON array of strings).
pub fn load_known_codes<P: AsRef<Path>>(path: P) -> Result<HashSet<String>, DataError> {
  load_json(path.as_ref())
}

/// Loads a persisted corpus.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LanguageRecord>, DataError> {
  let path = path.as_ref();
  let corpus: Vec<LanguageRecord> = load_json(path)?;
  info!(path = ?path, records = corpus.len(), "Corpus loaded");
  Ok(corpus)
}

/// Persists a corpus. Identical input produces byte-identical files.
pub fn save_corpus<P: AsRef<Path>>(path: P, corpus: &[LanguageRecord]) -> Result<(), DataError> {
  save_json(path.as_ref(), corpus)
}

/// Loads persisted tag groups.
pub fn load_tag_groups<P: AsRef<Path>>(path: P) -> Result<Vec<TagGroup>, DataError> {
  load_json(path.as_ref())
}

/// Persists tag groups.
pub fn save_tag_groups<P: AsRef<Path>>(path: P, groups: &[TagGroup]) -> Result<(), DataError> {
  save_json(path.as_ref(), groups)
}
