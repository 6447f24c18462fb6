//! langfinder 言語検索ライブラリー
//!
//! 言語タグレジストリを正規化した言語コーパスに対し、
//! tantivy を用いた段階的（完全一致 → 単語一致 → 前方一致 → 部分一致 → 曖昧一致）な検索を行う

/// 設定モジュール - LangFinderConfig, SearchKey, MatchTuning 等の設定構造体を定義
pub mod config;

/// エラーモジュール - LangFinderError, LangFinderResult 等のエラー型を定義
pub mod errors;

/// ハイライトモジュール - 検索語の出現箇所による表示文字列の分割
pub mod highlight;

/// インデックスモジュール - Tantivy によるメモリ上の検索インデックスの構築
pub mod indexer;

/// データモデルモジュール - LanguageRecord, TagGroup 等のデータ構造を定義
pub mod models;

/// 正規化モジュール - 生レジストリから言語レコードへの変換
pub mod normalizer;

/// レジストリモジュール - スクリプト・地域コード表とデータファイルの読み書き
pub mod registry;

/// 検索モジュール - 段階的な言語検索とインクリメンタル検索を提供
pub mod searcher;

/// サービスモジュール - LangFinderService 等の上位レベル API を提供
pub mod service;

/// タグモジュール - 言語タグの最短形への解決
pub mod tags;

/// 再エクスポート
pub use config::{LangFinderConfig, MatchTuning, SearchKey};
pub use errors::{LangFinderError, LangFinderResult};
pub use models::{FormattedSegment, LanguageField, LanguageRecord, TagGroup};
pub use searcher::{LanguageSearcher, SearchTier, SearcherOptions, TierBatch};
pub use service::LangFinderService;
