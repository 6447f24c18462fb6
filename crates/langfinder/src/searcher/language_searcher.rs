//! Tiered language search
//!
//! Runs the five match tiers (complete → whole word → start of word →
//! substring → fuzzy) over the in-memory corpus index and maps every hit back
//! to its record through the stored record index.

use std::collections::HashMap;

use tantivy::collector::TopDocs;
use tantivy::query::{
  BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::TextAnalyzer;
use tantivy::{TantivyDocument, Term};
use tracing::{debug, info, trace, warn};

use crate::errors::SearcherError;
use crate::indexer::schema_builder::{
  EXACT_TOKENIZER, KeyFields, RECORD_INDEX_FIELD, WORDS_TOKENIZER,
};
use crate::indexer::CorpusIndex;
use crate::models::LanguageRecord;
use crate::searcher::incremental::{IncrementalSearch, TierSource, search_incremental};
use crate::searcher::options::{IdentityFn, SearcherOptions};
use crate::searcher::tier::SearchTier;
use crate::searcher::tokenization::{normalize_whole, unique_tokens};

/// Boost factor of the prefix variant relative to the full-word fuzzy match
const FUZZY_PREFIX_BOOST: f32 = 0.5;

/// Query words shorter than this must match exactly in the fuzzy tier
const FUZZY_MIN_WORD_CHARS: usize = 3;

/// Query words at least this long tolerate two edits
const FUZZY_TWO_EDITS_MIN_CHARS: usize = 6;

/// Regex query over the terms of `field`
fn regex_query(pattern: &str, field: Field) -> Result<Box<dyn Query>, SearcherError> {
  Ok(Box::new(RegexQuery::from_pattern(pattern, field)?))
}

/// Edit distance tolerated for a query word
fn fuzzy_distance(word: &str) -> u8 {
  match word.chars().count() {
    n if n < FUZZY_MIN_WORD_CHARS => 0,
    n if n < FUZZY_TWO_EDITS_MIN_CHARS => 1,
    _ => 2,
  }
}

/// Search engine over an immutable corpus of language records.
///
/// Built once; every query is read-only, so one instance can serve
/// concurrent callers.
pub struct LanguageSearcher {
  /// Searched records, in corpus order
  corpus: Vec<LanguageRecord>,

  /// Code → position in `corpus`
  by_code: HashMap<String, usize>,

  /// Tantivy index behind the tiers
  index: CorpusIndex,

  /// Deduplication identity
  identity: IdentityFn,

  /// Trace-log per-hit scores
  include_score: bool,
}

impl std::fmt::Debug for LanguageSearcher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LanguageSearcher")
      .field("records", &self.corpus.len())
      .field("index", &self.index)
      .finish_non_exhaustive()
  }
}

impl LanguageSearcher {
  /// Builds the searcher and its index.
  ///
  /// # Errors
  /// - No search key configured
  /// - Tantivy index construction failure
  pub fn new(corpus: Vec<LanguageRecord>, options: SearcherOptions) -> Result<Self, SearcherError> {
    let index = CorpusIndex::build(&corpus, &options)?;

    let mut by_code = HashMap::with_capacity(corpus.len());
    for (position, record) in corpus.iter().enumerate() {
      if by_code.insert(record.code.clone(), position).is_some() {
        warn!(code = %record.code, "Duplicate code in corpus; lookups return the last record");
      }
    }

    info!(records = corpus.len(), "Language searcher ready");

    Ok(Self {
      corpus,
      by_code,
      index,
      identity: options.identity,
      include_score: options.tuning.include_score,
    })
  }

  /// Searcher with the default options
  pub fn with_defaults(corpus: Vec<LanguageRecord>) -> Result<Self, SearcherError> {
    Self::new(corpus, SearcherOptions::default())
  }

  /// Searched records, in corpus order
  pub fn corpus(&self) -> &[LanguageRecord] {
    &self.corpus
  }

  /// Number of records
  pub fn len(&self) -> usize {
    self.corpus.len()
  }

  /// Whether the corpus is empty
  pub fn is_empty(&self) -> bool {
    self.corpus.is_empty()
  }

  /// Record with the given code
  pub fn record_by_code(&self, code: &str) -> Option<&LanguageRecord> {
    self.by_code.get(code).map(|&position| &self.corpus[position])
  }

  /// Identity of a record
  pub fn identity_of(&self, record: &LanguageRecord) -> String {
    (self.identity)(record)
  }

  /// Runs all five tiers and returns the deduplicated, priority-ordered records.
  pub fn search_for_language(&self, query: &str) -> Vec<&LanguageRecord> {
    let results: Vec<&LanguageRecord> =
      self.incremental(query).flat_map(|batch| batch.records).collect();
    debug!(query = %query, results = results.len(), "Search completed");
    results
  }

  /// Runs the tiers asynchronously, one batch per tier.
  ///
  /// See [`search_incremental`].
  pub async fn async_search_for_language<'a, F>(&'a self, query: &str, on_batch: F)
  where
    F: FnMut(&[&'a LanguageRecord], &str) -> bool,
  {
    search_incremental(self, query, on_batch).await
  }

  /// Resumable tier-by-tier cursor over `query`
  pub fn incremental(&self, query: &str) -> IncrementalSearch<'_, Self> {
    IncrementalSearch::new(self, query)
  }

  /// Runs a single tier, without cross-tier deduplication.
  ///
  /// Records are ordered by score, then by corpus order. A failing tier is
  /// logged and yields no records.
  pub fn search_tier(&self, tier: SearchTier, query: &str) -> Vec<&LanguageRecord> {
    match self.try_search_tier(tier, query) {
      Ok(records) => records,
      Err(e) => {
        warn!(tier = %tier, query = %query, error = %e, "Search tier failed; skipping it");
        Vec::new()
      }
    }
  }

  fn try_search_tier(
    &self,
    tier: SearchTier,
    query: &str,
  ) -> Result<Vec<&LanguageRecord>, SearcherError> {
    if self.corpus.is_empty() {
      return Ok(Vec::new());
    }

    let Some(tier_query) = self.build_tier_query(tier, query)? else {
      return Ok(Vec::new());
    };

    let searcher = self.index.reader().searcher();
    let top_docs = searcher.search(tier_query.as_ref(), &TopDocs::with_limit(self.corpus.len()))?;

    let mut hits: Vec<(f32, usize)> = Vec::with_capacity(top_docs.len());
    for (score, doc_address) in top_docs {
      let doc: TantivyDocument = searcher.doc(doc_address)?;
      let position = doc
        .get_first(self.index.fields().record_index)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .filter(|&position| position < self.corpus.len())
        .ok_or_else(|| SearcherError::InvalidIndex {
          field: RECORD_INDEX_FIELD.to_string(),
          reason: "Stored record index missing or out of range".to_string(),
        })?;
      hits.push((score, position));
    }

    hits.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

    Ok(
      hits
        .into_iter()
        .map(|(score, position)| {
          let record = &self.corpus[position];
          if self.include_score {
            trace!(tier = %tier, code = %record.code, score, "Tier hit");
          }
          record
        })
        .collect(),
    )
  }

  /// Fresh analyzer registered on the index
  fn analyzer(&self, name: &str) -> Result<TextAnalyzer, SearcherError> {
    self
      .index
      .index()
      .tokenizers()
      .get(name)
      .ok_or_else(|| SearcherError::TokenizerNotRegistered(name.to_string()))
  }

  /// Builds the tantivy query of a tier, `None` when the tier has nothing to search.
  fn build_tier_query(
    &self,
    tier: SearchTier,
    query: &str,
  ) -> Result<Option<Box<dyn Query>>, SearcherError> {
    match tier {
      SearchTier::Complete => self.build_key_query(query, |key, q| {
        Ok(Box::new(TermQuery::new(
          Term::from_field_text(key.exact, q),
          IndexRecordOption::Basic,
        )))
      }),
      SearchTier::WholeWord => self.build_key_query(query, |key, q| {
        regex_query(&format!(".* {} .*", regex::escape(q)), key.padded)
      }),
      SearchTier::StartOfWord => self.build_key_query(query, |key, q| {
        regex_query(&format!(".* {}.*", regex::escape(q)), key.padded)
      }),
      SearchTier::Substring => self.build_key_query(query, |key, q| {
        regex_query(&format!(".*{}.*", regex::escape(q)), key.exact)
      }),
      SearchTier::Fuzzy => self.build_fuzzy_query(query),
    }
  }

  /// One weighted clause per search key, any of which may match.
  ///
  /// `make` receives the key and the query normalized as a whole.
  fn build_key_query<F>(
    &self,
    query: &str,
    make: F,
  ) -> Result<Option<Box<dyn Query>>, SearcherError>
  where
    F: Fn(&KeyFields, &str) -> Result<Box<dyn Query>, SearcherError>,
  {
    let fields = self.index.fields();
    if fields.keys.is_empty() {
      return Ok(None);
    }

    let normalized = normalize_whole(&mut self.analyzer(EXACT_TOKENIZER)?, query);

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(fields.keys.len());
    for key in &fields.keys {
      let key_query = make(key, normalized.as_str())?;
      clauses.push((Occur::Should, Box::new(BoostQuery::new(key_query, key.weight))));
    }

    Ok(Some(Box::new(BooleanQuery::new(clauses))))
  }

  /// Every query word must be close to a word of some fuzzy key.
  fn build_fuzzy_query(&self, query: &str) -> Result<Option<Box<dyn Query>>, SearcherError> {
    let fields = self.index.fields();
    if fields.fuzzy.is_empty() {
      return Ok(None);
    }

    let words = unique_tokens(&mut self.analyzer(WORDS_TOKENIZER)?, query);
    if words.is_empty() {
      return Ok(None);
    }

    let mut word_clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(words.len());
    for word in &words {
      let distance = fuzzy_distance(word);
      let mut alternatives: Vec<(Occur, Box<dyn Query>)> = Vec::new();

      for key in &fields.fuzzy {
        let term = Term::from_field_text(key.words, word);
        alternatives.push((
          Occur::Should,
          Box::new(BoostQuery::new(
            Box::new(FuzzyTermQuery::new(term.clone(), distance, true)),
            key.weight,
          )),
        ));
        if distance > 0 {
          alternatives.push((
            Occur::Should,
            Box::new(BoostQuery::new(
              Box::new(FuzzyTermQuery::new_prefix(term, distance, true)),
              key.weight * FUZZY_PREFIX_BOOST,
            )),
          ));
        }
      }

      word_clauses.push((Occur::Must, Box::new(BooleanQuery::new(alternatives))));
    }

    debug!(query = %query, words = ?words, "Fuzzy query built");
    Ok(Some(Box::new(BooleanQuery::new(word_clauses))))
  }
}

impl TierSource for LanguageSearcher {
  type Item = LanguageRecord;

  fn corpus_len(&self) -> usize {
    self.corpus.len()
  }

  fn run_tier<'a>(&'a self, tier: SearchTier, query: &str) -> Vec<&'a LanguageRecord> {
    self.search_tier(tier, query)
  }

  fn identity_of(&self, item: &LanguageRecord) -> String {
    (self.identity)(item)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{MatchTuning, SearchKey};
  use crate::models::LanguageField;
  use std::collections::HashSet;

  // ─── Test Helper Functions ───────────────────────────────────────────────────

  fn corpus() -> Vec<LanguageRecord> {
    vec![
      LanguageRecord::new("uzn", "Northern Uzbek")
        .with_names(["Uzbek"])
        .with_region_names("Uzbekistan"),
      LanguageRecord::new("uzs", "Southern Uzbek").with_region_names("Afghanistan"),
      LanguageRecord::new("fra", "French")
        .with_autonym("Français")
        .with_region_names("France"),
      LanguageRecord::new("deu", "German").with_autonym("Deutsch"),
      LanguageRecord::new("tpi", "Tok Pisin").with_region_names("Papua New Guinea"),
      LanguageRecord::new("tkl", "Tokelauan").with_region_names("Tokelau"),
      LanguageRecord::new("xgo", "Gorman"),
    ]
  }

  fn searcher() -> LanguageSearcher {
    LanguageSearcher::with_defaults(corpus()).expect("Failed to build searcher")
  }

  fn codes(records: &[&LanguageRecord]) -> Vec<String> {
    records.iter().map(|r| r.code.clone()).collect()
  }

  // ─── Tier ordering ─────────────────────────────────────────────────────

  #[test]
  fn complete_match_precedes_fuzzy_match() {
    let searcher = searcher();
    assert_eq!(codes(&searcher.search_for_language("german")), vec!["deu", "xgo"]);
  }

  #[test]
  fn whole_word_precedes_start_of_word() {
    let searcher = searcher();
    assert_eq!(codes(&searcher.search_for_language("tok")), vec!["tpi", "tkl"]);
  }

  #[test]
  fn complete_match_on_alternate_name_comes_first() {
    let searcher = searcher();
    assert_eq!(codes(&searcher.search_for_language("uzbek")), vec!["uzn", "uzs"]);
  }

  #[test]
  fn single_tiers_are_not_deduplicated() {
    let searcher = searcher();

    assert_eq!(codes(&searcher.search_tier(SearchTier::Complete, "uzbek")), vec!["uzn"]);
    assert_eq!(
      codes(&searcher.search_tier(SearchTier::WholeWord, "uzbek")),
      vec!["uzn", "uzs"]
    );
    assert_eq!(codes(&searcher.search_tier(SearchTier::Substring, "ench")), vec!["fra"]);
  }

  // ─── Normalization ─────────────────────────────────────────────────────

  #[test]
  fn matching_ignores_case_and_diacritics_by_default() {
    let searcher = searcher();

    assert_eq!(codes(&searcher.search_for_language("FRENCH"))[0], "fra");
    assert_eq!(codes(&searcher.search_for_language("francais"))[0], "fra");
    assert_eq!(codes(&searcher.search_tier(SearchTier::Complete, "FRANÇAIS")), vec!["fra"]);
  }

  #[test]
  fn case_sensitive_tuning_disables_case_folding() {
    let options = SearcherOptions {
      tuning: MatchTuning {
        case_sensitive: true,
        ..MatchTuning::default()
      },
      ..SearcherOptions::default()
    };
    let searcher = LanguageSearcher::new(corpus(), options).unwrap();

    assert!(searcher.search_tier(SearchTier::Complete, "french").is_empty());
    assert_eq!(codes(&searcher.search_tier(SearchTier::Complete, "French")), vec!["fra"]);
  }

  #[test]
  fn fuzzy_tier_tolerates_typos() {
    let searcher = searcher();

    assert_eq!(codes(&searcher.search_for_language("frnch")), vec!["fra"]);
    assert_eq!(codes(&searcher.search_tier(SearchTier::Fuzzy, "deutsh")), vec!["deu"]);
  }

  #[test]
  fn fuzzy_tier_requires_every_word() {
    let searcher = searcher();
    assert_eq!(codes(&searcher.search_tier(SearchTier::Fuzzy, "tok pisn")), vec!["tpi"]);
    assert!(searcher.search_tier(SearchTier::Fuzzy, "tok french").is_empty());
  }

  #[test]
  fn short_words_must_match_exactly_in_fuzzy_tier() {
    let searcher = searcher();
    assert!(searcher.search_tier(SearchTier::Fuzzy, "ab").is_empty());
  }

  // ─── Deduplication & identity ─────────────────────────────────────────

  #[test]
  fn results_never_repeat_an_identity() {
    let searcher = searcher();

    for query in ["uz", "uzbek", "tok", "an", "german", "e", "fr"] {
      let results = searcher.search_for_language(query);
      let unique: HashSet<_> = results.iter().map(|r| r.code.as_str()).collect();
      assert_eq!(unique.len(), results.len(), "duplicate for {query}");
    }
  }

  #[test]
  fn custom_identity_controls_deduplication() {
    // Both Uzbek records share the identity "Uzbek"
    let options = SearcherOptions::default().with_identity(|r: &LanguageRecord| {
      r.exonym.split_whitespace().last().unwrap_or_default().to_string()
    });
    let searcher = LanguageSearcher::new(corpus(), options).unwrap();

    assert_eq!(codes(&searcher.search_for_language("uzbek")), vec!["uzn"]);
  }

  #[test]
  fn custom_padding_defines_word_boundaries() {
    let corpus = vec![LanguageRecord::new("gcf", "Saint-Martin Creole")];

    let default = LanguageSearcher::with_defaults(corpus.clone()).unwrap();
    assert!(default.search_tier(SearchTier::WholeWord, "martin").is_empty());
    assert_eq!(codes(&default.search_tier(SearchTier::Substring, "martin")), vec!["gcf"]);

    let options =
      SearcherOptions::default().with_padding(|v| format!(" {} ", v.replace('-', " ")));
    let hyphenated = LanguageSearcher::new(corpus, options).unwrap();
    assert_eq!(codes(&hyphenated.search_tier(SearchTier::WholeWord, "martin")), vec!["gcf"]);
  }

  #[test]
  fn key_weights_order_results_within_a_tier() {
    let corpus = vec![
      LanguageRecord::new("aaa", "Alpha").with_names(["Kiwi"]),
      LanguageRecord::new("bbb", "Kiwi"),
    ];
    let options = SearcherOptions {
      keys: vec![
        SearchKey::new(LanguageField::Names, 0.2),
        SearchKey::new(LanguageField::Exonym, 1.0),
      ],
      ..SearcherOptions::default()
    };
    let searcher = LanguageSearcher::new(corpus, options).unwrap();

    // Substring scores are constant per key, so the heavier key ranks first
    assert_eq!(codes(&searcher.search_tier(SearchTier::Substring, "kiw")), vec!["bbb", "aaa"]);
  }

  // ─── Edge cases ────────────────────────────────────────────────────────

  #[test]
  fn empty_corpus_returns_nothing() {
    let searcher = LanguageSearcher::with_defaults(Vec::new()).unwrap();
    assert!(searcher.is_empty());
    assert!(searcher.search_for_language("uzbek").is_empty());
  }

  #[test]
  fn regex_metacharacters_are_literal() {
    let searcher = searcher();
    assert!(searcher.search_for_language("(").is_empty());
    assert!(searcher.search_for_language(".*").is_empty());
  }

  #[test]
  fn record_by_code_finds_records() {
    let searcher = searcher();
    assert_eq!(searcher.record_by_code("tkl").map(|r| r.exonym.as_str()), Some("Tokelauan"));
    assert!(searcher.record_by_code("zzz").is_none());
    assert_eq!(searcher.len(), 7);
  }

  #[test]
  fn include_score_does_not_change_results() {
    let options = SearcherOptions {
      tuning: MatchTuning {
        include_score: true,
        ..MatchTuning::default()
      },
      ..SearcherOptions::default()
    };
    let with_scores = LanguageSearcher::new(corpus(), options).unwrap();

    assert_eq!(
      codes(&with_scores.search_for_language("uzbek")),
      codes(&searcher().search_for_language("uzbek"))
    );
  }

  // ─── Async ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn async_batches_match_sync_result() {
    let searcher = searcher();
    let mut delivered = Vec::new();
    let mut tiers = 0;

    searcher
      .async_search_for_language("tok", |records, _| {
        tiers += 1;
        delivered.extend(records.iter().map(|r| r.code.clone()));
        true
      })
      .await;

    assert_eq!(tiers, SearchTier::ALL.len());
    assert_eq!(delivered, codes(&searcher.search_for_language("tok")));
  }
}
