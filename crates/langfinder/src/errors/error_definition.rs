//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::models::LanguageField;

/// 設定（LangFinderConfig）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// search.keys が空
  #[error("search.keys に少なくとも1つのフィールドを指定してください")]
  EmptySearchKeys,

  /// キーの重みが正の有限値ではない
  #[error("フィールド {field} の重みは正の有限値である必要があります: actual={weight}")]
  InvalidKeyWeight {
    /// 対象フィールド
    field: LanguageField,
    /// 実際に指定された重み
    weight: f32,
  },

  /// search.default_limit < 1
  #[error("search.default_limit は 1 以上である必要があります: actual={actual}")]
  InvalidSearchDefaultLimit {
    /// 実際に指定された値
    actual: usize,
  },

  /// search.max_limit < search.default_limit
  #[error(
    "search.max_limit は search.default_limit 以上である必要があります: \
     default_limit={default_limit}, max_limit={max_limit}"
  )]
  InvalidSearchMaxLimit {
    /// search.default_limit
    default_limit: usize,
    /// search.max_limit
    max_limit: usize,
  },

  /// search.writer_memory_bytes が許容範囲外
  #[error(
    "search.writer_memory_bytes は {min}〜{max} バイトの範囲で指定してください: actual={actual}"
  )]
  InvalidWriterMemoryBytes {
    /// 許容される最小値（バイト）
    min: u64,
    /// 許容される最大値（バイト）
    max: u64,
    /// 実際に指定された値（バイト）
    actual: u64,
  },

  /// data.corpus_path と data.raw_registry_path のどちらも指定されていない
  #[error("data.corpus_path または data.raw_registry_path のどちらかを指定してください")]
  MissingCorpusSource,

  /// 設定ファイルの読み込み失敗
  #[error("設定ファイルの読み込みに失敗しました: path={path:?}, error={source}")]
  ReadFailed {
    /// 設定ファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// 設定ファイルの JSON 解析失敗
  #[error("設定ファイルの解析に失敗しました: {0}")]
  Parse(Arc<serde_json::Error>),
}

/// データファイル（レジストリ、コーパス、タググループ）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum DataError {
  /// ファイルの読み込み失敗
  #[error("データファイルの読み込みに失敗しました: path={path:?}, error={source}")]
  ReadFailed {
    /// 対象ファイル
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// ファイルの書き込み失敗
  #[error("データファイルの書き込みに失敗しました: path={path:?}, error={source}")]
  WriteFailed {
    /// 対象ファイル
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// JSON の解析失敗
  #[error("JSON の解析に失敗しました: path={path:?}, error={source}")]
  Parse {
    /// 対象ファイル
    path: PathBuf,
    /// 元となった JSON エラー
    #[source]
    source: Arc<serde_json::Error>,
  },

  /// JSON のシリアライズ失敗
  #[error("JSON のシリアライズに失敗しました: {0}")]
  Serialize(Arc<serde_json::Error>),

  /// 生レジストリのトップレベルが配列ではない
  #[error("生レジストリは JSON 配列である必要があります: path={0:?}")]
  RegistryNotAnArray(PathBuf),
}

/// インデクサー関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum IndexerError {
  /// Tantivy のインデックス操作エラー
  #[error("Tantivy インデックスエラー: {0}")]
  Tantivy(#[from] tantivy::TantivyError),

  /// 検索キーが1つも指定されていない
  #[error("検索キーが指定されていません")]
  NoSearchKeys,
}

/// 検索関連エラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SearcherError {
  /// インデックス構築時のエラー
  #[error(transparent)]
  Indexer(#[from] IndexerError),

  /// Tantivy の検索処理エラー
  #[error("Tantivy 検索エラー: {0}")]
  Tantivy(#[from] tantivy::TantivyError),

  /// トークナイザーが登録されていない
  #[error("トークナイザー `{0}` が登録されていません")]
  TokenizerNotRegistered(String),

  /// インデックスのスキーマ不整合など、検索に利用できない状態
  #[error("インデックスが不正です: field={field}, reason={reason}")]
  InvalidIndex {
    /// 問題が発生したフィールド名
    field: String,
    /// 不整合の理由
    reason: String,
  },
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `LangFinderResult<T>` = `Result<T, LangFinderError>` として使用する
///
/// 検索・ハイライト・タグ解決・正規化そのものはエラーを返さない。
/// ここに現れるのは起動時のデータ読み込みとインデックス構築の失敗のみ。
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum LangFinderError {
  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// データファイル関連エラー
  #[error(transparent)]
  Data(#[from] DataError),

  /// インデクサー関連エラー
  #[error(transparent)]
  Indexer(#[from] IndexerError),

  /// 検索関連エラー
  #[error(transparent)]
  Searcher(#[from] SearcherError),
}

/// langfinder クレートの標準 Result 型エイリアス
pub type LangFinderResult<T> = Result<T, LangFinderError>;
