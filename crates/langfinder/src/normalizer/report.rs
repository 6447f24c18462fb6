//! 正規化結果のレポート型定義
//!
//! 生レジストリの行数・スキップ数・派生コード数、
//! および未解決のマクロ言語展開を集計する型を定義します。

use serde::{Deserialize, Serialize};

/// 1つの行から3つ以上のコードが得られたマクロ言語展開
///
/// どのコードが正しいかは判断せず、記録のみ行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousExpansion {
  /// 元の行の ISO 639-3 コード
  pub source_code: String,
  /// 元のコードを含む、その行から得られた全コード（昇順）
  pub codes: Vec<String>,
}

/// `DataNormalizer::normalize` の集計結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
  /// 入力行の総数
  pub total_rows: usize,
  /// iso639_3 を持たないためスキップしたメタデータ行の数
  pub skipped_metadata_rows: usize,
  /// マージされたデータ行の数
  pub merged_rows: usize,
  /// マクロ言語展開で派生したコードの数（重複を含む）
  pub derived_disambiguation_codes: usize,
  /// 出力レコード数
  pub records: usize,
  /// 未解決のマクロ言語展開
  pub ambiguous_expansions: Vec<AmbiguousExpansion>,
}

impl NormalizationReport {
  /// 未解決の展開があるか
  pub fn has_ambiguities(&self) -> bool {
    !self.ambiguous_expansions.is_empty()
  }

  /// 入力行を記録
  pub fn record_row(&mut self) {
    self.total_rows += 1;
  }

  /// スキップを記録
  pub fn record_skipped(&mut self) {
    self.skipped_metadata_rows += 1;
  }

  /// マージを記録
  pub fn record_merged(&mut self) {
    self.merged_rows += 1;
  }

  /// 派生コードを記録
  pub fn record_derived(&mut self) {
    self.derived_disambiguation_codes += 1;
  }

  /// 未解決の展開を記録
  pub fn record_ambiguous(&mut self, source_code: impl Into<String>, codes: Vec<String>) {
    self.ambiguous_expansions.push(AmbiguousExpansion {
      source_code: source_code.into(),
      codes,
    });
  }
}
