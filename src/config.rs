//! HTTP設定とクロール設定

use crate::env::EnvVar;
use crate::error::{DexError, Result};
use crate::http::RetryPolicy;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// PokeAPI のベースURL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// 種族一覧が取得できない場合の最大id
pub const FALLBACK_MAX_ID: u32 = 1025;

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// タイムアウト（秒）
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: "catdex-cli".to_string(),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

/// クロール範囲の上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchLimit {
    /// 指定idまで
    UpTo(u32),
    /// APIが返す最大idまで
    All,
}

/// クロール設定
///
/// 優先順位: CLIフラグ > 環境変数 > 既定値
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: String,
    /// `<id>.json` と `index.json` を置くディレクトリ
    pub data_dir: PathBuf,
    pub start: u32,
    pub limit: FetchLimit,
    /// エントリ間の待ち時間
    pub delay: Duration,
    pub retry: RetryPolicy,
    pub http: HttpConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            start: 1,
            limit: FetchLimit::UpTo(151),
            delay: Duration::from_millis(100),
            retry: RetryPolicy::default(),
            http: HttpConfig::default(),
        }
    }
}

impl CrawlConfig {
    /// 既定値に環境変数を反映
    ///
    /// - `CATDEX_DATA_DIR`: データディレクトリ
    /// - `FETCH_ALL`: 全件取得
    /// - `START_INDEX`: 開始id
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = EnvVar::get("CATDEX_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if EnvVar::is_set("FETCH_ALL") {
            config.limit = FetchLimit::All;
        }
        if let Some(start) = EnvVar::get_parsed("START_INDEX") {
            config.start = start;
        }
        config
    }

    /// 範囲の整合性を検証
    pub fn validate(&self) -> Result<()> {
        if self.start == 0 {
            return Err(DexError::InvalidArgument(
                "start id must be at least 1".to_string(),
            ));
        }
        if let FetchLimit::UpTo(limit) = self.limit {
            if limit < self.start {
                return Err(DexError::InvalidArgument(format!(
                    "limit {} is below start {}",
                    limit, self.start
                )));
            }
        }
        Ok(())
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }
}

/// データディレクトリの解決（フラグ > 環境変数 > `data`）
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| EnvVar::get("CATDEX_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}
