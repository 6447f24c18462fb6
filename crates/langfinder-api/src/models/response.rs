//! Response Model Definition

use langfinder::{FormattedSegment, LanguageRecord, SearchTier, TierBatch};
use serde::Serialize;

/// Search Response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
  /// Matching records, best first
  pub results: Vec<LanguageRecord>,
  /// Elapsed time (milliseconds)
  pub elapsed_ms: u64,
}

/// Newly found records of one tier (DTO)
#[derive(Debug, Clone, Serialize)]
pub struct TierBatchDto {
  /// Tier that produced the batch
  pub tier: SearchTier,
  /// Records not reported by an earlier tier
  pub results: Vec<LanguageRecord>,
}

impl From<TierBatch<'_, LanguageRecord>> for TierBatchDto {
  fn from(batch: TierBatch<'_, LanguageRecord>) -> Self {
    Self {
      tier: batch.tier,
      results: batch.records.into_iter().cloned().collect(),
    }
  }
}

/// Tiered Search Response
#[derive(Debug, Serialize)]
pub struct TieredSearchResponse {
  /// Batches in tier order
  pub batches: Vec<TierBatchDto>,
  /// Elapsed time (milliseconds)
  pub elapsed_ms: u64,
}

/// Highlight Response
#[derive(Debug, Serialize)]
pub struct HighlightResponse {
  /// Segments concatenating back to the input text
  pub segments: Vec<FormattedSegment>,
}

/// Tag Resolution Response
#[derive(Debug, Serialize)]
pub struct TagResponse {
  /// Requested tag
  pub tag: String,
  /// Shortest equivalent tag (the tag itself when unknown)
  pub shortest: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn search_response_serialization() {
    let response = SearchResponse {
      results: vec![LanguageRecord::new("fra", "French")],
      elapsed_ms: 7,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["elapsed_ms"], 7);
    assert_eq!(json["results"][0]["code"], "fra");
    assert_eq!(json["results"][0]["isMacrolanguage"], false);
  }

  #[test]
  fn tier_batch_dto_from_batch() {
    let record = LanguageRecord::new("tpi", "Tok Pisin");
    let batch = TierBatch {
      tier: SearchTier::WholeWord,
      records: vec![&record],
    };

    let dto = TierBatchDto::from(batch);
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["tier"], "wholeWord");
    assert_eq!(json["results"][0]["exonym"], "Tok Pisin");
  }

  #[test]
  fn highlight_response_serialization() {
    let response = HighlightResponse {
      segments: vec![FormattedSegment::highlighted("Fr"), FormattedSegment::plain("ench")],
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["segments"][0]["isHighlighted"], true);
    assert_eq!(json["segments"][1]["text"], "ench");
  }
}
