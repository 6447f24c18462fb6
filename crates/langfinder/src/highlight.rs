//! Match highlighting
//!
//! Splits a display string into plain and highlighted segments around every
//! case-insensitive literal occurrence of the matched text.

use regex::RegexBuilder;
use tracing::debug;

use crate::models::FormattedSegment;

/// Splits `text` around the occurrences of `match_substring`.
///
/// - empty `text` → no segments
/// - empty `match_substring` → one plain segment
/// - otherwise alternating plain / highlighted segments, empty ones dropped
///
/// Matching is literal, case-insensitive, greedy left-to-right and
/// non-overlapping. Concatenating the segments always reproduces `text`.
pub fn highlight_matches(match_substring: &str, text: &str) -> Vec<FormattedSegment> {
  if text.is_empty() {
    return Vec::new();
  }
  if match_substring.is_empty() {
    return vec![FormattedSegment::plain(text)];
  }

  let pattern = match RegexBuilder::new(&regex::escape(match_substring))
    .case_insensitive(true)
    .build()
  {
    Ok(pattern) => pattern,
    Err(e) => {
      debug!(error = %e, "Highlight pattern rejected; returning plain text");
      return vec![FormattedSegment::plain(text)];
    }
  };

  let mut segments = Vec::new();
  let mut cursor = 0;
  for found in pattern.find_iter(text) {
    if found.start() > cursor {
      segments.push(FormattedSegment::plain(&text[cursor..found.start()]));
    }
    if !found.as_str().is_empty() {
      segments.push(FormattedSegment::highlighted(found.as_str()));
    }
    cursor = found.end();
  }
  if cursor < text.len() {
    segments.push(FormattedSegment::plain(&text[cursor..]));
  }

  segments
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
