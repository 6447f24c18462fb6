//! LangFinderService: langfinder クレートの統合ファサード。
//!
//! - コードレジストリ (CodeRegistry)
//! - 言語コーパス (永続化済みコーパス、または生レジストリからの正規化)
//! - 検索エンジン (LanguageSearcher)
//! - 最短タグ解決 (ShortestTagResolver)
//!
//! HTTP API などの外部からは、この構造体だけを意識すればよい。
//! すべての状態は起動時に一度だけ構築され、以後は読み取り専用。

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::LangFinderConfig;
use crate::errors::LangFinderResult;
use crate::highlight::highlight_matches;
use crate::models::{FormattedSegment, LanguageRecord, RawRegistryEntry, TagGroup};
use crate::normalizer::{DataNormalizer, NormalizationReport};
use crate::registry::{
  CodeRegistry, load_corpus, load_known_codes, load_raw_registry, load_tag_groups,
};
use crate::searcher::{LanguageSearcher, SearcherOptions, TierBatch};
use crate::tags::{ShortestTagResolver, build_tag_groups};

/// langfinder クレートの統合ファサード。
pub struct LangFinderService {
  /// 起動時の設定
  config: LangFinderConfig,

  /// スクリプト名・地域名・スクリプトサンプル
  registry: CodeRegistry,

  /// 検索エンジン（コーパスを所有する）
  searcher: LanguageSearcher,

  /// 最短タグ解決
  tags: ShortestTagResolver,

  /// 起動時に正規化した場合のみ保持するレポート
  normalization_report: Option<NormalizationReport>,
}

impl std::fmt::Debug for LangFinderService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LangFinderService")
      .field("records", &self.searcher.len())
      .field("tags", &self.tags.len())
      .finish_non_exhaustive()
  }
}

impl LangFinderService {
  /// 初期化（レジストリ読み込み + コーパス取得 + 検索エンジン構築）
  ///
  /// # 処理フロー
  /// 1. 設定の妥当性を検証
  /// 2. スクリプト・地域のコードレジストリを読み込む
  /// 3. コーパスを取得する
  ///    - `data.corpus_path` があれば永続化済みコーパスを読み込む
  ///    - なければ `data.raw_registry_path` の生レジストリを正規化する
  /// 4. タググループを取得する
  ///    - `data.tag_groups_path` があれば読み込む
  ///    - なければ生レジストリから構築する（生レジストリもなければ空）
  /// 5. LanguageSearcher と ShortestTagResolver を構築
  ///
  /// # エラー
  /// - 設定が不正
  /// - データファイルの読み込み・解析失敗
  /// - インデックス構築失敗
  pub fn init(config: &LangFinderConfig) -> LangFinderResult<Self> {
    // 設定の妥当性を検証（ConfigError は #[from] で LangFinderError に自動変換）
    config.validate()?;

    let data = &config.data;
    let registry = CodeRegistry::from_json_files(
      data.scripts_path.as_deref(),
      data.regions_path.as_deref(),
      data.script_samples_path.as_deref(),
    )?;

    // 生レジストリはコーパスかタググループのどちらかで必要な場合のみ読み込む
    let needs_raw = data.corpus_path.is_none() || data.tag_groups_path.is_none();
    let raw_entries: Option<Vec<RawRegistryEntry>> = match &data.raw_registry_path {
      Some(path) if needs_raw => Some(load_raw_registry(path)?),
      _ => None,
    };

    let (corpus, normalization_report) = match (&data.corpus_path, &raw_entries) {
      (Some(path), _) => (load_corpus(path)?, None),
      (None, Some(entries)) => {
        let known_codes = match &data.known_codes_path {
          Some(path) => load_known_codes(path)?,
          None => HashSet::new(),
        };
        let output = DataNormalizer::new(&registry, &known_codes).normalize(entries);
        if output.report.has_ambiguities() {
          warn!(
            count = output.report.ambiguous_expansions.len(),
            "Unresolved macrolanguage expansions in raw registry"
          );
        }
        (output.records, Some(output.report))
      }
      // validate() により到達しない
      (None, None) => (Vec::new(), None),
    };

    let tag_groups = match (&data.tag_groups_path, &raw_entries) {
      (Some(path), _) => load_tag_groups(path)?,
      (None, Some(entries)) => build_tag_groups(entries),
      (None, None) => {
        info!("No tag group source configured; tags resolve to themselves");
        Vec::new()
      }
    };

    let mut service = Self::from_parts(config, registry, corpus, &tag_groups)?;
    service.normalization_report = normalization_report;
    Ok(service)
  }

  /// 読み込み済みのデータからサービスを構築する。
  ///
  /// ファイルを介さずにサービスを組み立てる場合（テスト等）に使用する。
  pub fn from_parts(
    config: &LangFinderConfig,
    registry: CodeRegistry,
    corpus: Vec<LanguageRecord>,
    tag_groups: &[TagGroup],
  ) -> LangFinderResult<Self> {
    let searcher = LanguageSearcher::new(corpus, SearcherOptions::from_config(&config.search))?;
    let tags = ShortestTagResolver::new(tag_groups);

    info!(records = searcher.len(), tags = tags.len(), "LangFinderService initialized");

    Ok(Self {
      config: config.clone(),
      registry,
      searcher,
      tags,
      normalization_report: None,
    })
  }

  // ===== 検索 =====

  /// 全ティアを優先順に実行し、重複を除いた結果を返す。
  ///
  /// `limit` は `search.default_limit` / `search.max_limit` で補正される。
  pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<&LanguageRecord> {
    let limit = self.config.effective_limit(limit);
    let mut results = self.searcher.search_for_language(query);
    results.truncate(limit);
    results
  }

  /// ティアごとのバッチを返す。
  ///
  /// 全バッチの合計件数は `limit` で打ち切られ、上限に達した時点で
  /// 以降のティアは実行しない。
  pub fn search_tiers(&self, query: &str, limit: Option<usize>) -> Vec<TierBatch<'_, LanguageRecord>> {
    let mut remaining = self.config.effective_limit(limit);
    let mut cursor = self.searcher.incremental(query);
    let mut batches = Vec::new();

    while let Some(mut batch) = cursor.next() {
      batch.records.truncate(remaining);
      remaining -= batch.records.len();
      batches.push(batch);

      if remaining == 0 {
        cursor.cancel();
      }
    }

    batches
  }

  /// 表示文字列をクエリの出現箇所で分割する。
  pub fn highlight(&self, query: &str, text: &str) -> Vec<FormattedSegment> {
    highlight_matches(query, text)
  }

  /// タグを最短タグに解決する（未知のタグはそのまま返す）。
  pub fn resolve_tag<'a>(&'a self, tag: &'a str) -> &'a str {
    self.tags.resolve(tag)
  }

  /// コードに対応するレコードを返す。
  pub fn record(&self, code: &str) -> Option<&LanguageRecord> {
    self.searcher.record_by_code(code)
  }

  /// スクリプトのサンプル文字列を返す。
  pub fn script_sample(&self, script_code: &str) -> Option<&str> {
    self.registry.script_sample(script_code)
  }

  // ===== アクセサ =====

  /// コーパスのレコード数を返す。
  pub fn corpus_len(&self) -> usize {
    self.searcher.len()
  }

  /// 起動時に正規化を行った場合、そのレポートを返す。
  pub fn normalization_report(&self) -> Option<&NormalizationReport> {
    self.normalization_report.as_ref()
  }

  /// 内部の LanguageSearcher への参照を返す。
  pub fn searcher(&self) -> &LanguageSearcher {
    &self.searcher
  }

  /// 起動時の設定を返す。
  pub fn config(&self) -> &LangFinderConfig {
    &self.config
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// テストモジュール
// ─────────────────────────────────────────────────────────────────────────────
