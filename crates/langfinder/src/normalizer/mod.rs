//! normalizer モジュール
//!
//! 生レジストリの行を ISO 639-3 コード単位の LanguageRecord に正規化します。

pub mod data_normalizer;
pub mod report;

/// 主要な型を再エクスポート
pub use data_normalizer::{DataNormalizer, NormalizationOutput, normalize, uncomma};
pub use report::{AmbiguousExpansion, NormalizationReport};
