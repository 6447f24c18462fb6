//! Script / region code registry
//!
//! Immutable lookup tables for script codes, region codes and script samples.
//! Built once by an explicit constructor at startup and passed by reference to
//! the normalizer and the service; there is no global table.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::errors::DataError;
use crate::registry::data_loader::load_json;

/// Lookup tables consumed by normalization and display.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
  /// Script code → display name
  script_names: HashMap<String, String>,

  /// Region code → display name
  region_names: HashMap<String, String>,

  /// Script code → sample text
  script_samples: HashMap<String, String>,
}

impl CodeRegistry {
  /// Builds a registry from script and region tables.
  pub fn new(script_names: HashMap<String, String>, region_names: HashMap<String, String>) -> Self {
    Self {
      script_names,
      region_names,
      script_samples: HashMap::new(),
    }
  }

  /// Builds a registry from `(code, name)` pairs. Convenient for tests and small tables.
  pub fn from_pairs<'a, S, R>(scripts: S, regions: R) -> Self
  where
    S: IntoIterator<Item = (&'a str, &'a str)>,
    R: IntoIterator<Item = (&'a str, &'a str)>,
  {
    let owned = |(code, name): (&str, &str)| (code.to_string(), name.to_string());
    Self::new(
      scripts.into_iter().map(owned).collect(),
      regions.into_iter().map(owned).collect(),
    )
  }

  /// Builder that attaches the script sample table
  #[must_use]
  pub fn with_script_samples(mut self, samples: HashMap<String, String>) -> Self {
    self.script_samples = samples;
    self
  }

  /// Loads the tables from JSON objects (`{"Latn": "Latin", ...}`).
  ///
  /// Absent paths produce empty tables; every lookup then degrades to `None`.
  pub fn from_json_files(
    scripts_path: Option<&Path>,
    regions_path: Option<&Path>,
    script_samples_path: Option<&Path>,
  ) -> Result<Self, DataError> {
    let script_names = load_table(scripts_path)?;
    let region_names = load_table(regions_path)?;
    let script_samples = load_table(script_samples_path)?;

    debug!(
      scripts = script_names.len(),
      regions = region_names.len(),
      samples = script_samples.len(),
      "Code registry loaded"
    );

    Ok(Self {
      script_names,
      region_names,
      script_samples,
    })
  }

  /// Display name of a script code
  pub fn script_name(&self, code: &str) -> Option<&str> {
    self.script_names.get(code).map(String::as_str)
  }

  /// Display name of a region code
  pub fn region_name(&self, code: &str) -> Option<&str> {
    self.region_names.get(code).map(String::as_str)
  }

  /// Sample text written in a script
  pub fn script_sample(&self, code: &str) -> Option<&str> {
    self.script_samples.get(code).map(String::as_str)
  }
}

/// Loads one `code → name` table, empty when no path is configured
fn load_table(path: Option<&Path>) -> Result<HashMap<String, String>, DataError> {
  match path {
    Some(path) => load_json(path),
    None => Ok(HashMap::new()),
  }
}
