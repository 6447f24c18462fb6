//! Registry → corpus normalization
//!
//! Merges every raw registry row carrying the same ISO 639-3 code into a single
//! [`LanguageRecord`], derives macrolanguage disambiguation records, and
//! finalizes display strings.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::models::{LanguageRecord, RawRegistryEntry, ScriptInfo};
use crate::normalizer::report::NormalizationReport;
use crate::registry::CodeRegistry;

/// Distinct codes (source code included) above which an expansion is flagged as ambiguous
const MAX_UNAMBIGUOUS_EXPANSION_CODES: usize = 2;

/// Turns `"Uzbek, Northern"` into `"Northern Uzbek"`.
///
/// Only strings with exactly two `", "`-separated parts are reordered;
/// everything else is returned unchanged.
pub fn uncomma(text: &str) -> String {
  let parts: Vec<&str> = text.split(", ").collect();
  match parts.as_slice() {
    [last, first] => format!("{first} {last}"),
    _ => text.to_string(),
  }
}

/// Result of a normalization run
#[derive(Debug, Clone)]
pub struct NormalizationOutput {
  /// Normalized records, ordered by code
  pub records: Vec<LanguageRecord>,
  /// Run statistics
  pub report: NormalizationReport,
}

/// Normalizes the raw registry.
///
/// Shorthand for [`DataNormalizer::normalize`] that drops the report.
pub fn normalize(
  entries: &[RawRegistryEntry],
  registry: &CodeRegistry,
  known_codes: &HashSet<String>,
) -> Vec<LanguageRecord> {
  DataNormalizer::new(registry, known_codes).normalize(entries).records
}

/// Builds the immutable corpus from the raw registry.
///
/// Deterministic: identical input always produces identical output.
#[derive(Debug, Clone, Copy)]
pub struct DataNormalizer<'a> {
  /// Script / region display names
  registry: &'a CodeRegistry,

  /// Specific-language codes that gate macrolanguage expansion
  known_codes: &'a HashSet<String>,
}

/// Running merge state of one code
#[derive(Debug)]
struct RecordAccumulator {
  code: String,
  autonym: Option<String>,
  exonym: String,
  names: BTreeSet<String>,
  region_names: BTreeSet<String>,
  script_codes: BTreeSet<String>,
  alternative_tags: BTreeSet<String>,
  is_for_macrolanguage_disambiguation: bool,
}

/// Values contributed by one registry row
struct RowContribution {
  autonym: Option<String>,
  exonym: Option<String>,
  names: BTreeSet<String>,
  region_names: BTreeSet<String>,
  script_codes: BTreeSet<String>,
  alternative_tags: BTreeSet<String>,
}

impl<'a> DataNormalizer<'a> {
  /// Constructor for DataNormalizer
  pub fn new(registry: &'a CodeRegistry, known_codes: &'a HashSet<String>) -> Self {
    Self {
      registry,
      known_codes,
    }
  }

  /// Normalizes the raw registry rows.
  ///
  /// # Process Flow
  /// 1. Skip rows without `iso639_3` (registry metadata)
  /// 2. Merge the row into the accumulator of its code
  /// 3. For known specific-language codes, derive disambiguation records from
  ///    3-letter primary subtags found in the row's tags
  /// 4. Finalize every accumulator into a record
  pub fn normalize(&self, entries: &[RawRegistryEntry]) -> NormalizationOutput {
    let mut report = NormalizationReport::default();
    let mut accumulators: BTreeMap<String, RecordAccumulator> = BTreeMap::new();
    let mut macrolanguages: HashSet<String> = HashSet::new();

    for entry in entries {
      report.record_row();

      let Some(code) = non_empty(entry.iso639_3.as_deref()) else {
        report.record_skipped();
        continue;
      };

      if let Some(macrolang) = non_empty(entry.macrolang.as_deref()) {
        macrolanguages.insert(macrolang.to_string());
      }

      let contribution = self.contribution(entry);
      merge_into(
        &mut accumulators,
        code,
        &contribution,
        entry.is_for_macrolanguage_disambiguation,
      );
      report.record_merged();

      if self.known_codes.contains(code) {
        expand_macrolanguage(&mut accumulators, code, entry, &contribution, &mut report);
      }
    }

    let records: Vec<LanguageRecord> = accumulators
      .into_values()
      .map(|acc| acc.finish(self.registry, &macrolanguages))
      .collect();
    report.records = records.len();

    info!(
      total_rows = report.total_rows,
      skipped = report.skipped_metadata_rows,
      derived = report.derived_disambiguation_codes,
      records = report.records,
      ambiguous = report.ambiguous_expansions.len(),
      "Normalization completed"
    );

    NormalizationOutput { records, report }
  }

  /// Collects everything one row contributes to its accumulator
  fn contribution(&self, entry: &RawRegistryEntry) -> RowContribution {
    let autonym = entry
      .localnames
      .first()
      .map(String::as_str)
      .filter(|s| !s.is_empty())
      .or_else(|| non_empty(entry.localname.as_deref()))
      .map(String::from);

    let names = entry
      .names
      .iter()
      .chain(&entry.localname)
      .chain(&entry.localnames)
      .chain(&entry.iana)
      .chain(&entry.latnnames)
      .chain(&entry.macrolang)
      .filter(|s| !s.is_empty())
      .cloned()
      .collect();

    let script_codes = non_empty(entry.script.as_deref()).map(String::from).into_iter().collect();

    let alternative_tags = entry
      .tags
      .iter()
      .chain(&entry.tag)
      .chain(&entry.full)
      .filter(|s| !s.is_empty())
      .cloned()
      .collect();

    RowContribution {
      autonym,
      exonym: non_empty(entry.name.as_deref()).map(String::from),
      names,
      region_names: self.region_names(entry),
      script_codes,
      alternative_tags,
    }
  }

  /// Region display names of one row
  ///
  /// The row's own `regionname` stands in for a primary region the registry does not know.
  fn region_names(&self, entry: &RawRegistryEntry) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let fallback = non_empty(entry.regionname.as_deref());

    match non_empty(entry.region.as_deref()) {
      Some(region) => match self.registry.region_name(region).or(fallback) {
        Some(name) => {
          names.insert(name.to_string());
        }
        None => debug!(region, "Unknown region code"),
      },
      None => names.extend(fallback.map(String::from)),
    }

    for region in entry.regions.iter().filter(|r| !r.is_empty()) {
      match self.registry.region_name(region) {
        Some(name) => {
          names.insert(name.to_string());
        }
        None => debug!(region = %region, "Unknown region code"),
      }
    }

    names
  }
}

/// Merges a row contribution into the accumulator of `code`.
///
/// Sets are unioned, the first non-empty autonym/exonym is kept, and the
/// disambiguation flag is ANDed across merges.
fn merge_into(
  accumulators: &mut BTreeMap<String, RecordAccumulator>,
  code: &str,
  contribution: &RowContribution,
  is_for_macrolanguage_disambiguation: bool,
) {
  match accumulators.entry(code.to_string()) {
    Entry::Vacant(slot) => {
      slot.insert(RecordAccumulator {
        code: code.to_string(),
        autonym: contribution.autonym.clone(),
        exonym: contribution.exonym.clone().unwrap_or_default(),
        names: contribution.names.clone(),
        region_names: contribution.region_names.clone(),
        script_codes: contribution.script_codes.clone(),
        alternative_tags: contribution.alternative_tags.clone(),
        is_for_macrolanguage_disambiguation,
      });
    }
    Entry::Occupied(slot) => {
      let acc = slot.into_mut();
      if acc.autonym.is_none() {
        acc.autonym = contribution.autonym.clone();
      }
      if acc.exonym.is_empty() {
        acc.exonym = contribution.exonym.clone().unwrap_or_default();
      }
      acc.names.extend(contribution.names.iter().cloned());
      acc.region_names.extend(contribution.region_names.iter().cloned());
      acc.script_codes.extend(contribution.script_codes.iter().cloned());
      acc.alternative_tags.extend(contribution.alternative_tags.iter().cloned());
      acc.is_for_macrolanguage_disambiguation &= is_for_macrolanguage_disambiguation;
    }
  }
}

/// Derives disambiguation records from the 3-letter primary subtags of a row's tags.
///
/// Codes already handled for this row (its own code included) are not derived twice.
/// More than two distinct codes is left unresolved: logged and reported only.
fn expand_macrolanguage(
  accumulators: &mut BTreeMap<String, RecordAccumulator>,
  source_code: &str,
  entry: &RawRegistryEntry,
  contribution: &RowContribution,
  report: &mut NormalizationReport,
) {
  let mut in_progress: BTreeSet<&str> = BTreeSet::from([source_code]);

  for tag in &entry.tags {
    let Some(primary) = tag.split('-').next() else {
      continue;
    };
    if primary.chars().count() != 3 || !in_progress.insert(primary) {
      continue;
    }

    debug!(source = source_code, derived = primary, "Deriving disambiguation record");
    merge_into(accumulators, primary, contribution, true);
    report.record_derived();
  }

  if in_progress.len() > MAX_UNAMBIGUOUS_EXPANSION_CODES {
    let codes: Vec<String> = in_progress.iter().map(|c| c.to_string()).collect();
    warn!(
      source = source_code,
      codes = ?codes,
      "Macrolanguage expansion produced more than two codes; left unresolved"
    );
    report.record_ambiguous(source_code, codes);
  }
}

impl RecordAccumulator {
  /// Finalizes the accumulator into a record
  fn finish(self, registry: &CodeRegistry, macrolanguages: &HashSet<String>) -> LanguageRecord {
    let mut raw_names = self.names;
    if let Some(autonym) = &self.autonym {
      raw_names.remove(autonym);
    }
    raw_names.remove(&self.exonym);

    let autonym = self.autonym.as_deref().map(uncomma);
    let exonym = if self.exonym.is_empty() {
      self.code.clone()
    } else {
      uncomma(&self.exonym)
    };

    // Reordering can recreate the autonym or exonym; drop those again
    let names = raw_names
      .iter()
      .map(|name| uncomma(name))
      .filter(|name| *name != exonym && Some(name) != autonym.as_ref())
      .collect();

    let region_names = self
      .region_names
      .iter()
      .map(|name| uncomma(name))
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect::<Vec<_>>()
      .join(", ");

    let scripts = self
      .script_codes
      .into_iter()
      .map(|code| {
        let name = registry.script_name(&code).map(uncomma);
        if name.is_none() {
          debug!(script = %code, "Unknown script code");
        }
        ScriptInfo { code, name }
      })
      .collect();

    LanguageRecord {
      is_macrolanguage: macrolanguages.contains(&self.code),
      code: self.code,
      autonym,
      exonym,
      names,
      region_names,
      scripts,
      alternative_tags: self.alternative_tags,
      is_for_macrolanguage_disambiguation: self.is_for_macrolanguage_disambiguation,
    }
  }
}

/// `Some` only for non-empty strings
fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|s| !s.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
