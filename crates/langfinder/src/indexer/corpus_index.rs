//! In-memory corpus index
//!
//! Builds the tantivy index behind the four match engines: one document per
//! language record, with the record's position in the corpus stored alongside.

use tantivy::tokenizer::{
  AsciiFoldingFilter, LowerCaser, RawTokenizer, SimpleTokenizer, TextAnalyzer, Tokenizer,
};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tracing::{debug, info};

use crate::config::MatchTuning;
use crate::errors::IndexerError;
use crate::indexer::schema_builder::{EXACT_TOKENIZER, SchemaFields, WORDS_TOKENIZER, build_schema};
use crate::models::LanguageRecord;
use crate::searcher::SearcherOptions;

/// Builds an analyzer applying the case / diacritics normalizers of `tuning`.
pub fn build_analyzer<T: Tokenizer>(tokenizer: T, tuning: &MatchTuning) -> TextAnalyzer {
  match (tuning.case_sensitive, tuning.ignore_diacritics) {
    (false, true) => TextAnalyzer::builder(tokenizer)
      .filter(LowerCaser)
      .filter(AsciiFoldingFilter)
      .build(),
    (false, false) => TextAnalyzer::builder(tokenizer).filter(LowerCaser).build(),
    (true, true) => TextAnalyzer::builder(tokenizer).filter(AsciiFoldingFilter).build(),
    (true, false) => TextAnalyzer::builder(tokenizer).build(),
  }
}

/// Read-only tantivy index over a corpus.
///
/// # Responsibilities
///
/// - Schema definition and tokenizer registration
/// - One document per record (single indexing thread, so document order is corpus order)
/// - Reader with a manual reload policy; the index never changes after `build`
pub struct CorpusIndex {
  /// Tantivy Index handle
  index: Index,

  /// IndexReader (for searching)
  reader: IndexReader,

  /// Schema fields reference
  fields: SchemaFields,
}

impl std::fmt::Debug for CorpusIndex {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CorpusIndex")
      .field("fields", &self.fields)
      .field("num_docs", &self.reader.searcher().num_docs())
      .finish_non_exhaustive()
  }
}

impl CorpusIndex {
  /// Indexes `corpus` in RAM.
  ///
  /// # Errors
  /// - No search key at all (neither `keys` nor `fuzzy_keys`)
  /// - Tantivy index creation / write error
  pub fn build(corpus: &[LanguageRecord], options: &SearcherOptions) -> Result<Self, IndexerError> {
    if options.keys.is_empty() && options.fuzzy_keys.is_empty() {
      return Err(IndexerError::NoSearchKeys);
    }

    let (schema, fields) = build_schema(&options.keys, &options.fuzzy_keys);
    let index = Index::create_in_ram(schema);

    index
      .tokenizers()
      .register(EXACT_TOKENIZER, build_analyzer(RawTokenizer::default(), &options.tuning));
    index
      .tokenizers()
      .register(WORDS_TOKENIZER, build_analyzer(SimpleTokenizer::default(), &options.tuning));

    let mut writer: IndexWriter = index.writer_with_num_threads(1, options.writer_memory_bytes)?;

    for (position, record) in corpus.iter().enumerate() {
      let mut doc = TantivyDocument::default();
      doc.add_u64(fields.record_index, position as u64);

      for key in &fields.keys {
        for value in options.values(record, key.key) {
          doc.add_text(key.padded, options.pad(&value));
          doc.add_text(key.exact, value);
        }
      }
      for key in &fields.fuzzy {
        for value in options.values(record, key.key) {
          doc.add_text(key.words, value);
        }
      }

      writer.add_document(doc)?;
    }

    writer.commit()?;
    debug!(records = corpus.len(), "Corpus documents committed");

    let reader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;

    info!(
      records = corpus.len(),
      keys = fields.keys.len(),
      fuzzy_keys = fields.fuzzy.len(),
      "Corpus index built"
    );

    Ok(Self {
      index,
      reader,
      fields,
    })
  }

  /// Returns reference to Tantivy Index
  pub fn index(&self) -> &Index {
    &self.index
  }

  /// Returns reference to IndexReader
  pub fn reader(&self) -> &IndexReader {
    &self.reader
  }

  /// Returns reference to SchemaFields
  pub fn fields(&self) -> &SchemaFields {
    &self.fields
  }
}
