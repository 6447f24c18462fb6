//! クエリトークナイゼーションモジュール
//!
//! 検索クエリをインデックスと同じアナライザーで正規化します。

use std::collections::HashSet;

use tantivy::tokenizer::{TextAnalyzer, TokenStream};

/// 与えられた Tokenizer を用いてクエリ文字列をトークナイズする純粋関数（ジェネリクス版）
///
/// # ジェネリクス
/// tantivy 0.25.0 の `Tokenizer` トレイトは `Self: Sized` を要求しているため
/// `&dyn Tokenizer` は使用できません。代わりにジェネリクス `<T: Tokenizer>` を使用します。
#[cfg(test)]
pub(crate) fn unique_tokens_with_tokenizer<T>(tokenizer: &mut T, query_str: &str) -> Vec<String>
where
  T: tantivy::tokenizer::Tokenizer,
{
  let mut token_stream = tokenizer.token_stream(query_str);
  unique_tokens_from_stream(&mut token_stream)
}

/// クエリを単語に分割し、正規化済みのユニークな単語を返す
///
/// 曖昧一致ティアで使用する。
pub(crate) fn unique_tokens(analyzer: &mut TextAnalyzer, query_str: &str) -> Vec<String> {
  let mut token_stream = analyzer.token_stream(query_str);
  unique_tokens_from_stream(&mut token_stream)
}

/// クエリ全体を1トークンとして正規化する
///
/// raw トークナイザーのアナライザーを渡すこと。完全一致・単語境界・
/// 部分一致ティアで使用する。
pub(crate) fn normalize_whole(analyzer: &mut TextAnalyzer, query_str: &str) -> String {
  let mut token_stream = analyzer.token_stream(query_str);
  let mut normalized = String::new();
  while token_stream.advance() {
    normalized.push_str(&token_stream.token().text);
  }
  normalized
}

/// トークンストリームからユニークなトークンを抽出する共通処理
///
/// - 空文字列トークンをスキップ
/// - 重複トークンを除外（最初の出現のみ採用）
fn unique_tokens_from_stream<T: TokenStream + ?Sized>(token_stream: &mut T) -> Vec<String> {
  let mut seen = HashSet::new();
  let mut tokens = Vec::new();

  while token_stream.advance() {
    let token = token_stream.token();

    // 空トークンはスキップ
    if token.text.is_empty() {
      continue;
    }

    // 重複トークンはスキップ（最初の出現のみ採用）
    if !seen.insert(token.text.clone()) {
      continue;
    }

    tokens.push(token.text.clone());
  }

  tokens
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::MatchTuning;
  use crate::indexer::build_analyzer;
  use tantivy::tokenizer::{RawTokenizer, SimpleTokenizer, Token, Tokenizer};

  /// 重複トークンが除外されることのテスト
  #[test]
  fn unique_tokens_deduplicates_in_first_seen_order() {
    let mut analyzer = build_analyzer(SimpleTokenizer::default(), &MatchTuning::default());

    let tokens = unique_tokens(&mut analyzer, "Tok tok PISIN tok");

    assert_eq!(tokens, vec!["tok".to_string(), "pisin".to_string()]);
  }

  #[test]
  fn normalize_whole_keeps_spaces_and_folds() {
    let mut analyzer = build_analyzer(RawTokenizer::default(), &MatchTuning::default());

    assert_eq!(normalize_whole(&mut analyzer, "Tok Písin"), "tok pisin");
    assert_eq!(normalize_whole(&mut analyzer, ""), "");
  }

  /// 空トークンがスキップされ、かつ重複が除外されることのテスト
  ///
  /// SimpleTokenizer では空トークンを生成しないため、
  /// テスト用の Tokenizer を自前で実装します。
  #[derive(Clone)]
  struct TestTokenizer;

  impl Tokenizer for TestTokenizer {
    type TokenStream<'a> = TestTokenStream;

    fn token_stream<'a>(&mut self, _text: &'a str) -> Self::TokenStream<'a> {
      let token = |text: &str| Token {
        text: text.to_string(),
        ..Default::default()
      };
      TestTokenStream {
        tokens: vec![token(""), token("uzbek"), token(""), token("uzbek"), token("northern")],
        index: 0,
      }
    }
  }

  struct TestTokenStream {
    tokens: Vec<Token>,
    index: usize,
  }

  impl TokenStream for TestTokenStream {
    fn advance(&mut self) -> bool {
      if self.index < self.tokens.len() {
        self.index += 1;
        true
      } else {
        false
      }
    }

    fn token(&self) -> &Token {
      // advance 後にのみ呼ばれる前提
      &self.tokens[self.index - 1]
    }

    fn token_mut(&mut self) -> &mut Token {
      // advance 後にのみ呼ばれる前提
      &mut self.tokens[self.index - 1]
    }
  }

  #[test]
  fn unique_tokens_skip_empty_and_deduplicate() {
    let mut tokenizer = TestTokenizer;

    let tokens = unique_tokens_with_tokenizer(&mut tokenizer, "ignored");

    // 空文字は含まれず、重複も取り除かれている
    assert_eq!(tokens, vec!["uzbek".to_string(), "northern".to_string()]);
  }
}
