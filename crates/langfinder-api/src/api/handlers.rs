//! HTTPハンドラー定義

use axum::{
  Json,
  extract::{Path, State},
};
use langfinder::LanguageRecord;
use tracing::{debug, error, info};

use crate::errors::{ApiError, Result};
use crate::models::{
  HighlightRequest, HighlightResponse, SearchRequest, SearchResponse, TagResponse,
  TieredSearchResponse,
};

use super::state::AppState;

/// CPUバウンドな処理を spawn_blocking で実行する
///
/// 検索はインデックスを走査する重い処理のため、非同期ランタイムをブロックしないよう分離
async fn run_blocking<T, F>(task: F) -> Result<T>
where
  T: Send + 'static,
  F: FnOnce() -> Result<T> + Send + 'static,
{
  tokio::task::spawn_blocking(task).await.map_err(|e| {
    error!(error = %e, "spawn_blocking エラー");
    ApiError::internal("処理の実行に失敗しました")
  })?
}

/// POST /search エンドポイント
///
/// 全ティアを優先順に実行し、重複を除いた結果を返す。
///
/// # Request Body
/// ```json
/// { "query": "uzbek", "limit": 10 }
/// ```
///
/// # Response
/// - 200 OK: 検索成功（2文字未満のクエリは空の結果）
/// - 400 Bad Request: 入力エラー（クエリ長超過）
/// - 500 Internal Server Error: 内部エラー
pub async fn post_search(
  State(state): State<AppState>,
  Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
  debug!(query = %request.query, limit = ?request.limit, "検索リクエストを受信");

  let service = state.service.clone();
  let response = run_blocking(move || service.search(request)).await?;

  info!(
    results = response.results.len(),
    elapsed_ms = response.elapsed_ms,
    "検索完了"
  );

  Ok(Json(response))
}

/// POST /search/tiers エンドポイント
///
/// ティアごとの新規一致をバッチとして返す。
pub async fn post_search_tiers(
  State(state): State<AppState>,
  Json(request): Json<SearchRequest>,
) -> Result<Json<TieredSearchResponse>> {
  debug!(query = %request.query, limit = ?request.limit, "ティア別検索リクエストを受信");

  let service = state.service.clone();
  let response = run_blocking(move || service.search_tiers(request)).await?;

  info!(
    batches = response.batches.len(),
    elapsed_ms = response.elapsed_ms,
    "ティア別検索完了"
  );

  Ok(Json(response))
}

/// POST /highlight エンドポイント
///
/// 表示文字列をクエリの出現箇所で分割する。軽い処理のため同期的に実行する。
pub async fn post_highlight(
  State(state): State<AppState>,
  Json(request): Json<HighlightRequest>,
) -> Result<Json<HighlightResponse>> {
  Ok(Json(state.service.highlight(request)?))
}

/// GET /tags/{tag} エンドポイント
///
/// タグを最短タグに解決する。未知のタグはそのまま返る。
pub async fn get_tag(
  State(state): State<AppState>,
  Path(tag): Path<String>,
) -> Result<Json<TagResponse>> {
  Ok(Json(state.service.resolve_tag(&tag)?))
}

/// GET /languages/{code} エンドポイント
///
/// # Response
/// - 200 OK: レコード
/// - 404 Not Found: コードが存在しない
pub async fn get_language(
  State(state): State<AppState>,
  Path(code): Path<String>,
) -> Result<Json<LanguageRecord>> {
  Ok(Json(state.service.language(&code)?))
}

/// ヘルスチェックエンドポイント
///
/// サーバーが稼働しているかを確認する。
pub async fn health_check() -> &'static str {
  "OK"
}
