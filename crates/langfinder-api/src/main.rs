//! langfinder-api サーバーエントリーポイント

use std::sync::Arc;

use langfinder_api::ApiError;
use langfinder_api::api::AppState;
use langfinder_api::api::run_server;
use langfinder_api::config::Config;
use langfinder_api::service::LangFinderApiServiceFull;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // 設定の読み込み
  let config = Config::from_env()?;
  let library_config = config.library_config()?;

  // ロギングの初期化（RUST_LOG が設定レベルより優先される）
  library_config.logging.init_tracing();
  tracing::info!(config = ?config.config_path, "設定を読み込みました");

  // サービスの初期化（コーパス読み込み + インデックス構築）
  let service = Arc::new(LangFinderApiServiceFull::new(&library_config)?);
  tracing::info!("言語検索サービスを初期化しました");

  // アプリケーション状態の作成
  let state = AppState::new(config, service);

  // サーバー起動
  run_server(state).await
}
