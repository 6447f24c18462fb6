//! API設定の定数定義

/// 検索クエリの最大長（文字数）
///
/// 言語名の検索にこれ以上の長さは不要。
pub const MAX_QUERY_LENGTH: usize = 256;

/// ハイライト対象テキストの最大長（文字数）
pub const MAX_TEXT_LENGTH: usize = 4_096;

/// 検索を実行するクエリの最小文字数
///
/// 1文字のクエリはほぼ全件に一致するため、検索せずに空の結果を返す。
pub const MIN_QUERY_CHARS: usize = 2;

/// デフォルトのバインドアドレス
///
/// 開発環境での利用を想定した localhost の標準ポート。
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5530";

/// 設定ファイルが指定されない場合に読み込むコーパスのパス
pub const DEFAULT_CORPUS_PATH: &str = "data/corpus.json";
