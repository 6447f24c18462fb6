//! crates/langfinder/tests/integration_test.rs
//!
//! End-to-end integration test.
//! Verifies the entire flow: Load registry files -> Normalize -> Persist corpus ->
//! Build index -> Search -> Verify results.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use langfinder::LangFinderConfig;
use langfinder::LangFinderService;
use langfinder::LanguageRecord;
use langfinder::SearchTier;
use langfinder::normalizer::DataNormalizer;
use langfinder::registry::{
  CodeRegistry, load_corpus, load_known_codes, load_raw_registry, save_corpus,
};
use langfinder::searcher::search_incremental;
use langfinder::tags::{ShortestTagResolver, build_tag_groups};

/// Path of a fixture file.
fn fixture(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Loads the code registry from the fixtures.
fn fixture_registry() -> CodeRegistry {
  CodeRegistry::from_json_files(
    Some(&fixture("scripts.json")),
    Some(&fixture("regions.json")),
    Some(&fixture("script_samples.json")),
  )
  .expect("Failed to load code registry")
}

/// Normalizes the fixture registry.
fn fixture_corpus() -> Vec<LanguageRecord> {
  let entries = load_raw_registry(fixture("langtags_sample.json")).expect("Failed to load registry");
  let known = load_known_codes(fixture("known_codes.json")).expect("Failed to load known codes");
  let registry = fixture_registry();

  DataNormalizer::new(&registry, &known).normalize(&entries).records
}

/// Writes a configuration file pointing at the fixtures and initializes the service.
fn fixture_service(temp_dir: &TempDir) -> LangFinderService {
  let path_str = |name: &str| fixture(name).to_string_lossy().into_owned();
  let config_json = serde_json::json!({
    "data": {
      "raw_registry_path": path_str("langtags_sample.json"),
      "scripts_path": path_str("scripts.json"),
      "regions_path": path_str("regions.json"),
      "script_samples_path": path_str("script_samples.json"),
      "known_codes_path": path_str("known_codes.json"),
    },
    "search": { "default_limit": 10 },
    "logging": { "level": "debug" }
  });

  let config_path = temp_dir.path().join("langfinder.json");
  fs::write(&config_path, config_json.to_string()).expect("Failed to write config");

  let config = LangFinderConfig::from_json_file(&config_path).expect("Failed to load config");
  config.logging.init_tracing();

  LangFinderService::init(&config).expect("Failed to initialize service")
}

fn find<'a>(records: &'a [LanguageRecord], code: &str) -> &'a LanguageRecord {
  records.iter().find(|r| r.code == code).unwrap_or_else(|| panic!("record {code} not found"))
}

fn codes(records: &[&LanguageRecord]) -> Vec<String> {
  records.iter().map(|r| r.code.clone()).collect()
}

// ─── Normalization ────────────────────────────────────────────────────

#[test]
fn normalizes_fixture_registry() {
  let records = fixture_corpus();

  let all_codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
  assert_eq!(
    all_codes,
    vec!["aln", "cmn", "deu", "eng", "fra", "tkl", "tpi", "uzn", "uzs", "yue", "zho"]
  );

  // Rows sharing a code are merged, region names sorted and joined
  let eng = find(&records, "eng");
  assert_eq!(eng.region_names, "Australia, United Kingdom, United States");
  assert!(eng.alternative_tags.contains("en-Latn-GB"));
  assert!(eng.names.contains("Anglais"));

  // Two-part names are reordered
  let cmn = find(&records, "cmn");
  assert_eq!(cmn.exonym, "Mandarin Chinese");
  assert_eq!(cmn.autonym.as_deref(), Some("中文"));
  assert_eq!(
    cmn.scripts.iter().next().and_then(|s| s.name.as_deref()),
    Some("Simplified Han")
  );
  assert!(find(&records, "tpi").names.contains("New Guinea Pidgin"));

  // Unknown region code falls back to the row's regionname
  assert_eq!(find(&records, "aln").region_names, "Kosovo");

  // Macrolanguage derived from a known code
  let zho = find(&records, "zho");
  assert!(zho.is_for_macrolanguage_disambiguation);
  assert!(zho.is_macrolanguage);
  assert!(!cmn.is_for_macrolanguage_disambiguation);
  assert!(!cmn.is_macrolanguage);
}

#[test]
fn normalization_report_counts_rows() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  let report = service.normalization_report().expect("raw registry was normalized");
  assert_eq!(report.total_rows, 12);
  assert_eq!(report.skipped_metadata_rows, 1);
  assert_eq!(report.merged_rows, 11);
  assert_eq!(report.derived_disambiguation_codes, 1);
  assert_eq!(report.records, 11);
  assert!(!report.has_ambiguities());
}

// ─── Persistence ──────────────────────────────────────────────────────

#[test]
fn corpus_persists_deterministically() {
  let temp_dir = TempDir::new().unwrap();
  let first = temp_dir.path().join("corpus-1.json");
  let second = temp_dir.path().join("corpus-2.json");
  let corpus = fixture_corpus();

  save_corpus(&first, &corpus).unwrap();
  save_corpus(&second, &fixture_corpus()).unwrap();

  assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
  assert_eq!(load_corpus(&first).unwrap(), corpus);
}

#[test]
fn service_serves_persisted_corpus() {
  let temp_dir = TempDir::new().unwrap();
  let corpus_path = temp_dir.path().join("corpus.json");
  save_corpus(&corpus_path, &fixture_corpus()).unwrap();

  let service = LangFinderService::init(&LangFinderConfig::with_corpus(&corpus_path)).unwrap();

  assert_eq!(service.corpus_len(), 11);
  assert_eq!(codes(&service.search("german", None))[0], "deu");
}

// ─── Search ───────────────────────────────────────────────────────────

#[test]
fn search_finds_by_every_name_kind() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  // exonym, autonym, other name, region, code
  assert_eq!(codes(&service.search("english", None))[0], "eng");
  assert_eq!(codes(&service.search("Deutsch", None))[0], "deu");
  assert_eq!(codes(&service.search("pidgin", None))[0], "tpi");
  assert!(codes(&service.search("kosovo", None)).contains(&"aln".to_string()));
  assert_eq!(codes(&service.search("uzs", None))[0], "uzs");
}

#[test]
fn search_orders_by_tier() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  // "Tok Pisin" has the whole word, "Tokelauan" only starts with it
  let results = codes(&service.search("tok", None));
  assert_eq!(results[..2], ["tpi".to_string(), "tkl".to_string()]);
}

#[test]
fn search_tolerates_typos_and_diacritics() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  assert_eq!(codes(&service.search("fransais", None))[0], "fra");
  assert_eq!(codes(&service.search("FRANCAIS", None))[0], "fra");
  assert!(service.search("qqqqqqqq", None).is_empty());
}

#[test]
fn search_tiers_and_limit() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  let batches = service.search_tiers("tok", None);
  assert_eq!(batches.len(), SearchTier::ALL.len());

  let delivered: Vec<&str> =
    batches.iter().flat_map(|b| b.records.iter().map(|r| r.code.as_str())).collect();
  let unique: HashSet<&str> = delivered.iter().copied().collect();
  assert_eq!(delivered.len(), unique.len());

  assert_eq!(service.search("uzbek", Some(1)).len(), 1);
}

#[tokio::test]
async fn async_search_delivers_batches() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);
  let mut delivered = Vec::new();

  search_incremental(service.searcher(), "uzbek", |records, query| {
    assert_eq!(query, "uzbek");
    delivered.extend(records.iter().map(|r| r.code.clone()));
    true
  })
  .await;

  assert_eq!(delivered[..2], ["uzn".to_string(), "uzs".to_string()]);
}

// ─── Tags, highlight, samples ─────────────────────────────────────────

#[test]
fn tags_resolve_to_shortest() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  assert_eq!(service.resolve_tag("en-Latn-US"), "en");
  assert_eq!(service.resolve_tag("EN-latn-us"), "en");
  assert_eq!(service.resolve_tag("en-Latn-GB"), "en-GB");
  assert_eq!(service.resolve_tag("zh-Hans-CN"), "zh-CN");
  assert_eq!(service.resolve_tag("uzs-Arab-AF"), "uz-Arab");
  assert_eq!(service.resolve_tag("xx-Unknown"), "xx-Unknown");
}

#[test]
fn tag_groups_skip_metadata_rows() {
  let entries = load_raw_registry(fixture("langtags_sample.json")).unwrap();

  let groups = build_tag_groups(&entries);
  assert_eq!(groups.len(), 11);
  assert!(groups.iter().all(|g| !g.shortest.starts_with('_')));

  let resolver = ShortestTagResolver::new(&groups);
  assert_eq!(resolver.resolve("_globalvar"), "_globalvar");
}

#[test]
fn highlight_and_script_samples() {
  let temp_dir = TempDir::new().unwrap();
  let service = fixture_service(&temp_dir);

  let segments = service.highlight("kin", "Mandarin Chinese, Peking");
  let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
  assert_eq!(joined, "Mandarin Chinese, Peking");
  assert_eq!(segments.iter().filter(|s| s.is_highlighted).count(), 1);

  assert_eq!(service.script_sample("Hans"), Some("汉字"));
  assert_eq!(service.script_sample("Cyrl"), None);
}
