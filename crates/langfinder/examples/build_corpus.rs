//! langfinder crate example
//!
//! Normalizes a raw language-tag registry into a persisted corpus and tag groups,
//! then runs a few searches over the result.
//!
//! ```bash
//! cargo run --example build_corpus -- tests/fixtures out/
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use langfinder::config::LoggingConfig;
use langfinder::normalizer::DataNormalizer;
use langfinder::registry::{
  CodeRegistry, load_known_codes, load_raw_registry, save_corpus, save_tag_groups,
};
use langfinder::searcher::LanguageSearcher;
use langfinder::tags::build_tag_groups;

/// Application common result type
type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Path of an optional input file, `None` when it does not exist
fn optional(dir: &Path, name: &str) -> Option<PathBuf> {
  let path = dir.join(name);
  path.exists().then_some(path)
}

fn main() -> AppResult<()> {
  LoggingConfig::default().init_tracing();

  let mut args = std::env::args().skip(1);
  let input_dir = PathBuf::from(args.next().unwrap_or_else(|| "tests/fixtures".to_string()));
  let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "target/langfinder".to_string()));
  std::fs::create_dir_all(&output_dir)?;

  // Code tables (each file is optional)
  let registry = CodeRegistry::from_json_files(
    optional(&input_dir, "scripts.json").as_deref(),
    optional(&input_dir, "regions.json").as_deref(),
    optional(&input_dir, "script_samples.json").as_deref(),
  )?;

  let known_codes = match optional(&input_dir, "known_codes.json") {
    Some(path) => load_known_codes(path)?,
    None => HashSet::new(),
  };

  // Normalize
  let entries = load_raw_registry(input_dir.join("langtags_sample.json"))?;
  let output = DataNormalizer::new(&registry, &known_codes).normalize(&entries);
  for ambiguous in &output.report.ambiguous_expansions {
    println!("unresolved expansion: {} -> {:?}", ambiguous.source_code, ambiguous.codes);
  }

  // Persist
  save_corpus(output_dir.join("corpus.json"), &output.records)?;
  save_tag_groups(output_dir.join("tag_groups.json"), &build_tag_groups(&entries))?;
  println!("{} records written to {}", output.records.len(), output_dir.display());

  // Search
  let searcher = LanguageSearcher::with_defaults(output.records)?;
  for query in ["tok", "uzbek", "fransais"] {
    println!("=== {query}");
    for tier_batch in searcher.incremental(query) {
      for record in tier_batch.records {
        println!("  [{}] {} ({})", tier_batch.tier, record.exonym, record.code);
      }
    }
  }

  Ok(())
}
