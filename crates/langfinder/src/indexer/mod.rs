//! indexer モジュール
//!
//! 言語レコードのインメモリ Tantivy インデックスの作成を担当します。

pub mod corpus_index;
pub mod schema_builder;

/// 主要な型を再エクスポート
pub use corpus_index::{CorpusIndex, build_analyzer};
pub use schema_builder::{FuzzyFields, KeyFields, SchemaFields, build_schema};
