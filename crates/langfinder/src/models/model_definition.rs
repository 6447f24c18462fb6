//! Data Model Definition
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Script attached to a language record
///
/// `name` is `None` when the script code is unknown to the code registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScriptInfo {
  /// ISO 15924 script code (e.g. `Latn`)
  pub code: String,

  /// Display name (e.g. `Latin`)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

/// Normalized language record
///
/// One record per ISO 639-3 code. This is also the persisted corpus format:
/// sets are written as sorted lists and `region_names` as a single joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRecord {
  /// ISO 639-3 code (unique key of the corpus)
  pub code: String,

  /// Self-name of the language
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub autonym: Option<String>,

  /// Display name
  pub exonym: String,

  /// Alternate display names (never contains the autonym or exonym)
  #[serde(default)]
  pub names: BTreeSet<String>,

  /// Comma-joined region display names
  #[serde(default)]
  pub region_names: String,

  /// Scripts used to write the language
  #[serde(default)]
  pub scripts: BTreeSet<ScriptInfo>,

  /// Full tags that resolve to this language
  #[serde(default)]
  pub alternative_tags: BTreeSet<String>,

  /// True only if the record exists to disambiguate a macrolanguage
  #[serde(default)]
  pub is_for_macrolanguage_disambiguation: bool,

  /// Best effort macrolanguage flag
  #[serde(default)]
  pub is_macrolanguage: bool,
}

impl LanguageRecord {
  /// Constructor with only the required fields
  pub fn new(code: impl Into<String>, exonym: impl Into<String>) -> Self {
    Self {
      code: code.into(),
      autonym: None,
      exonym: exonym.into(),
      names: BTreeSet::new(),
      region_names: String::new(),
      scripts: BTreeSet::new(),
      alternative_tags: BTreeSet::new(),
      is_for_macrolanguage_disambiguation: false,
      is_macrolanguage: false,
    }
  }

  /// Builder that sets the autonym
  #[must_use]
  pub fn with_autonym(mut self, autonym: impl Into<String>) -> Self {
    self.autonym = Some(autonym.into());
    self
  }

  /// Builder that adds alternate names
  #[must_use]
  pub fn with_names<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.names.extend(names.into_iter().map(Into::into));
    self
  }

  /// Builder that sets the joined region display string
  #[must_use]
  pub fn with_region_names(mut self, region_names: impl Into<String>) -> Self {
    self.region_names = region_names.into();
    self
  }

  /// Builder that adds a script
  #[must_use]
  pub fn with_script(mut self, code: impl Into<String>, name: Option<&str>) -> Self {
    self.scripts.insert(ScriptInfo {
      code: code.into(),
      name: name.map(String::from),
    });
    self
  }

  /// Builder that adds alternative tags
  #[must_use]
  pub fn with_alternative_tags<I, S>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.alternative_tags.extend(tags.into_iter().map(Into::into));
    self
  }
}

/// Row of the raw language-tag registry
///
/// Every field is optional: the registry interleaves metadata rows with data rows,
/// and rows without `iso639_3` are skipped by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegistryEntry {
  /// ISO 639-3 code
  #[serde(default)]
  pub iso639_3: Option<String>,

  /// Shortest canonical tag
  #[serde(default)]
  pub tag: Option<String>,

  /// Fully expanded tag
  #[serde(default)]
  pub full: Option<String>,

  /// Equivalent tags
  #[serde(default)]
  pub tags: Vec<String>,

  /// English name
  #[serde(default)]
  pub name: Option<String>,

  /// Other English names
  #[serde(default)]
  pub names: Vec<String>,

  /// Self-name
  #[serde(default)]
  pub localname: Option<String>,

  /// Other self-names
  #[serde(default)]
  pub localnames: Vec<String>,

  /// Names from the IANA subtag registry
  #[serde(default)]
  pub iana: Vec<String>,

  /// Romanized self-names
  #[serde(default)]
  pub latnnames: Vec<String>,

  /// Macrolanguage this language belongs to
  #[serde(default)]
  pub macrolang: Option<String>,

  /// Default script code
  #[serde(default)]
  pub script: Option<String>,

  /// Primary region code
  #[serde(default)]
  pub region: Option<String>,

  /// Other region codes
  #[serde(default)]
  pub regions: Vec<String>,

  /// Display name of the primary region
  #[serde(default)]
  pub regionname: Option<String>,

  /// Pre-set disambiguation flag
  #[serde(default, rename = "isForMacrolanguageDisambiguation")]
  pub is_for_macrolanguage_disambiguation: bool,
}

/// Group of tags that all resolve to one shortest tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagGroup {
  /// Canonical shortest tag
  pub shortest: String,

  /// Every tag of the group
  #[serde(default)]
  pub all_tags: BTreeSet<String>,
}

impl TagGroup {
  /// Constructor for TagGroup
  pub fn new<I, S>(shortest: impl Into<String>, all_tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      shortest: shortest.into(),
      all_tags: all_tags.into_iter().map(Into::into).collect(),
    }
  }
}

/// Display segment produced by the highlighter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSegment {
  /// Segment text
  pub text: String,

  /// Whether the segment is a match
  pub is_highlighted: bool,
}

impl FormattedSegment {
  /// Plain segment
  pub fn plain(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_highlighted: false,
    }
  }

  /// Highlighted segment
  pub fn highlighted(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_highlighted: true,
    }
  }
}

/// Searchable field of a [`LanguageRecord`]
///
/// Each variant has an explicit extraction function, so the search engine never
/// probes records by field name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageField {
  /// `code`
  Code,
  /// `autonym`
  Autonym,
  /// `exonym`
  Exonym,
  /// `names`
  Names,
  /// `regionNames`
  RegionNames,
  /// script display names
  Scripts,
  /// `alternativeTags`
  AlternativeTags,
}

impl LanguageField {
  /// Every searchable field
  pub const ALL: [LanguageField; 7] = [
    LanguageField::Code,
    LanguageField::Autonym,
    LanguageField::Exonym,
    LanguageField::Names,
    LanguageField::RegionNames,
    LanguageField::Scripts,
    LanguageField::AlternativeTags,
  ];

  /// Name used as prefix of the index field names
  pub fn index_name(&self) -> &'static str {
    match self {
      LanguageField::Code => "code",
      LanguageField::Autonym => "autonym",
      LanguageField::Exonym => "exonym",
      LanguageField::Names => "names",
      LanguageField::RegionNames => "region_names",
      LanguageField::Scripts => "scripts",
      LanguageField::AlternativeTags => "alternative_tags",
    }
  }

  /// Extracts the non-empty values of this field from a record
  pub fn values(&self, record: &LanguageRecord) -> Vec<String> {
    let values: Vec<String> = match self {
      LanguageField::Code => vec![record.code.clone()],
      LanguageField::Autonym => record.autonym.iter().cloned().collect(),
      LanguageField::Exonym => vec![record.exonym.clone()],
      LanguageField::Names => record.names.iter().cloned().collect(),
      LanguageField::RegionNames => vec![record.region_names.clone()],
      LanguageField::Scripts => record.scripts.iter().filter_map(|s| s.name.clone()).collect(),
      LanguageField::AlternativeTags => record.alternative_tags.iter().cloned().collect(),
    };

    values.into_iter().filter(|v| !v.is_empty()).collect()
  }
}

impl fmt::Display for LanguageField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.index_name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
