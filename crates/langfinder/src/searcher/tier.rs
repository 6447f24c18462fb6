//! Search tiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Match strategy, in priority order.
///
/// A record found by an earlier tier is never reported again by a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchTier {
  /// A field value equals the query
  Complete,
  /// The query is a whole word of a field value
  WholeWord,
  /// A word of a field value starts with the query
  StartOfWord,
  /// A field value contains the query
  Substring,
  /// Every query word is within a bounded edit distance of a word of a field value
  Fuzzy,
}

impl SearchTier {
  /// Every tier in priority order
  pub const ALL: [SearchTier; 5] = [
    SearchTier::Complete,
    SearchTier::WholeWord,
    SearchTier::StartOfWord,
    SearchTier::Substring,
    SearchTier::Fuzzy,
  ];

  /// Tier run after this one
  pub fn next(self) -> Option<SearchTier> {
    match self {
      SearchTier::Complete => Some(SearchTier::WholeWord),
      SearchTier::WholeWord => Some(SearchTier::StartOfWord),
      SearchTier::StartOfWord => Some(SearchTier::Substring),
      SearchTier::Substring => Some(SearchTier::Fuzzy),
      SearchTier::Fuzzy => None,
    }
  }

  /// Wire / log name
  pub fn as_str(&self) -> &'static str {
    match self {
      SearchTier::Complete => "complete",
      SearchTier::WholeWord => "wholeWord",
      SearchTier::StartOfWord => "startOfWord",
      SearchTier::Substring => "substring",
      SearchTier::Fuzzy => "fuzzy",
    }
  }
}

impl fmt::Display for SearchTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
