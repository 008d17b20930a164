/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }

    /// 数値として取得（パースできなければNone）
    pub fn get_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        Self::get(key).and_then(|s| s.trim().parse().ok())
    }

    /// 設定されていれば true（値は問わない、`0`/`false` は false）
    pub fn is_set(key: &str) -> bool {
        Self::get(key).is_some_and(|s| !matches!(s.as_str(), "0" | "false"))
    }
}
