//! リクエストモデル定義

use serde::Deserialize;

/// 言語検索リクエスト（/search, /search/tiers 共通）
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
  /// 検索クエリ
  pub query: String,
  /// 最大件数（省略時は設定の default_limit）
  #[serde(default)]
  pub limit: Option<usize>,
}

/// ハイライトリクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightRequest {
  /// 強調する文字列
  pub query: String,
  /// 表示文字列
  pub text: String,
}
