//! Tantivy スキーマビルダー
//!
//! 言語レコード検索用のインメモリインデックスのスキーマを定義します。
//! 検索キーごとに完全一致・部分一致用フィールドと、空白パディング済みの
//! シャドウフィールドを作成し、曖昧検索キーごとに単語フィールドを作成します。

use std::collections::BTreeMap;

use tantivy::schema::{
  Field, IndexRecordOption, NumericOptions, Schema, TextFieldIndexing, TextOptions,
};
use tracing::warn;

use crate::config::SearchKey;
use crate::models::LanguageField;

/// 値全体を1トークンとして扱うトークナイザー名（raw + 正規化フィルタ）
pub const EXACT_TOKENIZER: &str = "langfinder_exact";

/// 単語単位に分割するトークナイザー名（simple + 正規化フィルタ）
pub const WORDS_TOKENIZER: &str = "langfinder_words";

/// レコード番号を格納するフィールド名
pub const RECORD_INDEX_FIELD: &str = "record_index";

/// 完全一致・単語境界・部分一致ティア用のフィールド組
#[derive(Clone, Copy, Debug)]
pub struct KeyFields {
  /// 対象のレコードフィールド
  pub key: LanguageField,
  /// ランキング用の重み
  pub weight: f32,
  /// 値そのもの (`<key>_exact`)
  pub exact: Field,
  /// 空白でパディングした値 (`<key>_padded`)
  pub padded: Field,
}

/// 曖昧検索ティア用のフィールド
#[derive(Clone, Copy, Debug)]
pub struct FuzzyFields {
  /// 対象のレコードフィールド
  pub key: LanguageField,
  /// ランキング用の重み
  pub weight: f32,
  /// 単語分割した値 (`<key>_words`)
  pub words: Field,
}

/// スキーマフィールドへの参照をまとめて保持する構造体。
///
/// Tantivy の `Schema::get_field()` は文字列ベースの検索であるため、
/// フィールド名を typo するリスクがあります。この構造体は型安全な
/// フィールド参照を提供します。
#[derive(Clone, Debug)]
pub struct SchemaFields {
  /// 検索キーごとのフィールド（設定順）
  pub keys: Vec<KeyFields>,
  /// 曖昧検索キーごとのフィールド（設定順）
  pub fuzzy: Vec<FuzzyFields>,
  /// 元レコードのコーパス内番号 (u64, STORED)
  ///
  /// tantivy ドキュメントと元レコードの対応付けはこのフィールドのみで行う。
  pub record_index: Field,
}

/// 重複したキーを1つにまとめる。
///
/// 同じフィールドが複数回指定された場合は警告を出し、後の重みで上書きする。
/// 順序は最初に現れた位置を維持する。
pub fn merge_duplicate_keys(keys: &[SearchKey], role: &str) -> Vec<SearchKey> {
  let mut merged: Vec<SearchKey> = Vec::with_capacity(keys.len());
  let mut positions: BTreeMap<LanguageField, usize> = BTreeMap::new();

  for key in keys {
    match positions.get(&key.field) {
      Some(&pos) => {
        warn!(
          role,
          field = %key.field,
          previous = merged[pos].weight,
          weight = key.weight,
          "Search key listed twice; the later weight overwrites the earlier one"
        );
        merged[pos].weight = key.weight;
      }
      None => {
        positions.insert(key.field, merged.len());
        merged.push(*key);
      }
    }
  }

  merged
}

/// Tantivy スキーマを構築する。
///
/// # フィールド構成
///
/// - `<key>_exact`: 値そのもの（`langfinder_exact` トークナイザー）
///   - 完全一致ティア (TermQuery) と部分一致ティア (RegexQuery) で使用
/// - `<key>_padded`: 前後を空白でパディングした値（`langfinder_exact` トークナイザー）
///   - 単語一致・語頭一致ティア (RegexQuery) で使用
/// - `<key>_words`: 曖昧検索キーのみ（`langfinder_words` トークナイザー）
///   - 曖昧一致ティア (FuzzyTermQuery) で使用
/// - `record_index`: 元レコードの番号 (u64, STORED)
///
/// どのテキストフィールドも格納しない。結果は `record_index` 経由で
/// 元のレコードに戻す。
///
/// トークナイザーは `CorpusIndex` 作成時に登録される必要があります。
///
/// # 例
///
/// ```no_run
/// use langfinder::config::{default_fuzzy_keys, default_keys};
/// use langfinder::indexer::build_schema;
///
/// let (_schema, fields) = build_schema(&default_keys(), &default_fuzzy_keys());
/// assert_eq!(fields.keys.len(), 6);
/// ```
pub fn build_schema(keys: &[SearchKey], fuzzy_keys: &[SearchKey]) -> (Schema, SchemaFields) {
  let mut builder = Schema::builder();

  // 値全体を1語として索引する（頻度のみ記録）
  let exact_options = TextOptions::default().set_indexing_options(
    TextFieldIndexing::default()
      .set_tokenizer(EXACT_TOKENIZER)
      .set_index_option(IndexRecordOption::WithFreqs),
  );

  let words_options = TextOptions::default().set_indexing_options(
    TextFieldIndexing::default()
      .set_tokenizer(WORDS_TOKENIZER)
      .set_index_option(IndexRecordOption::WithFreqs),
  );

  let keys = merge_duplicate_keys(keys, "keys")
    .into_iter()
    .map(|key| {
      let name = key.field.index_name();
      KeyFields {
        key: key.field,
        weight: key.weight,
        exact: builder.add_text_field(&format!("{name}_exact"), exact_options.clone()),
        padded: builder.add_text_field(&format!("{name}_padded"), exact_options.clone()),
      }
    })
    .collect();

  let fuzzy = merge_duplicate_keys(fuzzy_keys, "fuzzy_keys")
    .into_iter()
    .map(|key| FuzzyFields {
      key: key.field,
      weight: key.weight,
      words: builder
        .add_text_field(&format!("{}_words", key.field.index_name()), words_options.clone()),
    })
    .collect();

  let record_index =
    builder.add_u64_field(RECORD_INDEX_FIELD, NumericOptions::default().set_stored());

  let schema = builder.build();

  (
    schema,
    SchemaFields {
      keys,
      fuzzy,
      record_index,
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{default_fuzzy_keys, default_keys};

  #[test]
  fn build_schema_creates_fields_per_key() {
    let (schema, fields) = build_schema(&default_keys(), &default_fuzzy_keys());

    assert_eq!(fields.keys.len(), default_keys().len());
    assert_eq!(fields.fuzzy.len(), default_fuzzy_keys().len());

    for name in ["exonym_exact", "exonym_padded", "region_names_padded", "names_words"] {
      assert!(schema.get_field(name).is_ok(), "missing field {name}");
    }
    assert!(schema.get_field(RECORD_INDEX_FIELD).is_ok());
    // Only the fuzzy keys get a words field
    assert!(schema.get_field("code_words").is_err());
  }

  #[test]
  fn duplicate_keys_are_merged_with_later_weight() {
    let keys = vec![
      SearchKey::new(LanguageField::Exonym, 1.0),
      SearchKey::new(LanguageField::Code, 0.5),
      SearchKey::new(LanguageField::Exonym, 2.0),
    ];

    let merged = merge_duplicate_keys(&keys, "keys");

    assert_eq!(
      merged,
      vec![
        SearchKey::new(LanguageField::Exonym, 2.0),
        SearchKey::new(LanguageField::Code, 0.5),
      ]
    );

    // Tantivy rejects duplicate field names, so the schema must see one entry
    let (_schema, fields) = build_schema(&keys, &[]);
    assert_eq!(fields.keys.len(), 2);
    assert_eq!(fields.keys[0].weight, 2.0);
  }

  #[test]
  fn empty_fuzzy_keys_produce_no_words_fields() {
    let (_schema, fields) = build_schema(&default_keys(), &[]);
    assert!(fields.fuzzy.is_empty());
  }
}
