//! Incremental tiered search
//!
//! The five tiers as a resumable cursor: each step runs exactly one tier and
//! yields the records not delivered by an earlier step of the same cursor.
//! [`search_incremental`] drives the cursor on a tokio runtime with one
//! suspension point between tiers.

use std::collections::HashSet;

use tracing::debug;

use crate::searcher::tier::SearchTier;

/// Anything the tiered search can run over.
pub trait TierSource {
  /// Searched item
  type Item;

  /// Number of searchable items
  fn corpus_len(&self) -> usize;

  /// Runs a single tier, best match first. Never fails: a broken tier is empty.
  fn run_tier<'a>(&'a self, tier: SearchTier, query: &str) -> Vec<&'a Self::Item>;

  /// Deduplication key of an item
  fn identity_of(&self, item: &Self::Item) -> String;
}

/// Newly found items of one tier
#[derive(Debug)]
pub struct TierBatch<'a, T> {
  /// Tier that produced the batch
  pub tier: SearchTier,
  /// Items not delivered by an earlier tier
  pub records: Vec<&'a T>,
}

/// Resumable cursor over the tiers of one query.
///
/// Each cursor owns its deduplication state, so concurrent searches never
/// share it.
pub struct IncrementalSearch<'a, S: TierSource + ?Sized> {
  source: &'a S,
  query: String,
  next_tier: Option<SearchTier>,
  delivered: HashSet<String>,
}

impl<'a, S: TierSource + ?Sized> IncrementalSearch<'a, S> {
  /// Cursor positioned before the first tier. Over an empty corpus it is already exhausted.
  pub fn new(source: &'a S, query: impl Into<String>) -> Self {
    let next_tier = (source.corpus_len() > 0).then_some(SearchTier::Complete);
    Self {
      source,
      query: query.into(),
      next_tier,
      delivered: HashSet::new(),
    }
  }

  /// Query of this cursor
  pub fn query(&self) -> &str {
    &self.query
  }

  /// Tier the next step will run, `None` once exhausted or cancelled
  pub fn next_tier(&self) -> Option<SearchTier> {
    self.next_tier
  }

  /// Stops the cursor; no further tier is started.
  pub fn cancel(&mut self) {
    self.next_tier = None;
  }
}

impl<'a, S> Iterator for IncrementalSearch<'a, S>
where
  S: TierSource + ?Sized,
  S::Item: 'a,
{
  type Item = TierBatch<'a, S::Item>;

  fn next(&mut self) -> Option<Self::Item> {
    let tier = self.next_tier?;
    self.next_tier = tier.next();

    let source = self.source;
    let delivered = &mut self.delivered;
    let records: Vec<&'a S::Item> = source
      .run_tier(tier, &self.query)
      .into_iter()
      .filter(|item| delivered.insert(source.identity_of(item)))
      .collect();

    debug!(tier = %tier, query = %self.query, found = records.len(), "Tier completed");
    Some(TierBatch { tier, records })
  }
}

/// Runs the tiers in priority order, handing each batch to `on_batch`.
///
/// - An empty corpus returns immediately; `on_batch` is never called.
/// - After every tier the task yields once to the scheduler, then `on_batch`
///   receives the tier's new records (possibly none) and the query.
/// - `on_batch` returning `false` stops the search; no further tier starts.
pub async fn search_incremental<'a, S, F>(source: &'a S, query: &str, mut on_batch: F)
where
  S: TierSource + ?Sized,
  S::Item: 'a,
  F: FnMut(&[&'a S::Item], &str) -> bool,
{
  if source.corpus_len() == 0 {
    debug!(query = %query, "Empty corpus; nothing to search");
    return;
  }

  for batch in IncrementalSearch::new(source, query) {
    tokio::task::yield_now().await;

    if !on_batch(&batch.records, query) {
      debug!(query = %query, tier = %batch.tier, "Search cancelled by caller");
      break;
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;

  /// Tier source over plain strings that records every tier it runs.
  ///
  /// Complete: equal, WholeWord: none, StartOfWord: prefix, Substring: contains,
  /// Fuzzy: everything.
  struct CountingSource {
    items: Vec<String>,
    calls: RefCell<Vec<SearchTier>>,
  }

  impl CountingSource {
    fn new(items: &[&str]) -> Self {
      Self {
        items: items.iter().map(|s| s.to_string()).collect(),
        calls: RefCell::new(Vec::new()),
      }
    }

    fn calls(&self) -> Vec<SearchTier> {
      self.calls.borrow().clone()
    }
  }

  impl TierSource for CountingSource {
    type Item = String;

    fn corpus_len(&self) -> usize {
      self.items.len()
    }

    fn run_tier<'a>(&'a self, tier: SearchTier, query: &str) -> Vec<&'a String> {
      self.calls.borrow_mut().push(tier);
      self
        .items
        .iter()
        .filter(|item| match tier {
          SearchTier::Complete => item.as_str() == query,
          SearchTier::WholeWord => false,
          SearchTier::StartOfWord => item.starts_with(query),
          SearchTier::Substring => item.contains(query),
          SearchTier::Fuzzy => true,
        })
        .collect()
    }

    fn identity_of(&self, item: &String) -> String {
      item.clone()
    }
  }

  #[test]
  fn cursor_deduplicates_across_tiers() {
    let source = CountingSource::new(&["uz", "uzbek", "southern uzbek", "french"]);

    let batches: Vec<_> = IncrementalSearch::new(&source, "uz").collect();

    let tiers: Vec<_> = batches.iter().map(|b| b.tier).collect();
    assert_eq!(tiers, SearchTier::ALL.to_vec());

    let found: Vec<Vec<&str>> =
      batches.iter().map(|b| b.records.iter().map(|s| s.as_str()).collect()).collect();
    assert_eq!(
      found,
      vec![
        vec!["uz"],
        vec![],
        vec!["uzbek"],
        vec!["southern uzbek"],
        vec!["french"],
      ]
    );
  }

  #[test]
  fn cancel_stops_further_tiers() {
    let source = CountingSource::new(&["uz"]);
    let mut cursor = IncrementalSearch::new(&source, "uz");

    assert_eq!(cursor.next_tier(), Some(SearchTier::Complete));
    assert!(cursor.next().is_some());
    cursor.cancel();

    assert!(cursor.next().is_none());
    assert_eq!(source.calls(), vec![SearchTier::Complete]);
  }

  #[test]
  fn empty_corpus_cursor_is_exhausted() {
    let source = CountingSource::new(&[]);
    let mut cursor = IncrementalSearch::new(&source, "uz");

    assert_eq!(cursor.next_tier(), None);
    assert!(cursor.next().is_none());
    assert!(source.calls().is_empty());
  }

  #[tokio::test]
  async fn returning_false_after_first_non_empty_batch_stops_tiers() {
    let source = CountingSource::new(&["uzbek", "french"]);
    let mut batches = Vec::new();

    search_incremental(&source, "uzb", |records, query| {
      assert_eq!(query, "uzb");
      batches.push(records.len());
      records.is_empty()
    })
    .await;

    // Complete and WholeWord are empty, StartOfWord finds "uzbek"
    assert_eq!(batches, vec![0, 0, 1]);
    assert_eq!(
      source.calls(),
      vec![SearchTier::Complete, SearchTier::WholeWord, SearchTier::StartOfWord]
    );
  }

  #[tokio::test]
  async fn empty_corpus_never_calls_on_batch() {
    let source = CountingSource::new(&[]);
    let mut called = false;

    search_incremental(&source, "uz", |_, _| {
      called = true;
      true
    })
    .await;

    assert!(!called);
    assert!(source.calls().is_empty());
  }

  #[tokio::test]
  async fn batches_concatenate_to_cursor_result() {
    let source = CountingSource::new(&["uz", "uzbek", "southern uzbek", "french"]);
    let expected: Vec<String> = IncrementalSearch::new(&source, "uz")
      .flat_map(|b| b.records)
      .cloned()
      .collect();

    let mut delivered = Vec::new();
    search_incremental(&source, "uz", |records, _| {
      delivered.extend(records.iter().map(|s| s.to_string()));
      true
    })
    .await;

    assert_eq!(delivered, expected);
  }
}
