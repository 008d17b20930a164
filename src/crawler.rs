//! オフラインクローラー
//!
//! 公開APIから全エントリを順番に取得し、エントリ単位のJSONと
//! index.json に正規化して保存する。ビルド前に一度だけ実行する想定。

pub mod normalize;
pub mod store;

pub use store::{RecordStore, RunMeta};

use crate::catalog::CatalogRecord;
use crate::config::{CrawlConfig, FetchLimit, HttpConfig, FALLBACK_MAX_ID};
use crate::error::{DexError, Result};
use crate::http::{self, with_retry, RetryPolicy};
use crate::output;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// JSON取得元
///
/// 本番は [`PokeApiClient`]、テストではモックを注入する。
pub trait CatalogSource: Send + Sync {
    /// JSONを取得（存在しなければ None）
    fn fetch_json<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>>> + Send + 'a>>;
}

/// PokeAPI クライアント
pub struct PokeApiClient {
    http: Client,
    retry: RetryPolicy,
}

impl PokeApiClient {
    pub fn new(config: &HttpConfig, retry: RetryPolicy) -> Result<Self> {
        Ok(Self {
            http: config.build_client()?,
            retry,
        })
    }
}

impl CatalogSource for PokeApiClient {
    fn fetch_json<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>>> + Send + 'a>> {
        Box::pin(async move { with_retry(|| http::get_json(&self.http, url), &self.retry).await })
    }
}

/// クロール結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// 新たに保存したid
    pub saved: Vec<u32>,
    pub already_existed: usize,
    /// 404 または取得失敗でスキップしたid
    pub missing: Vec<u32>,
    /// 再生成後の index 件数
    pub indexed: usize,
}

/// クローラー
pub struct Crawler {
    source: Box<dyn CatalogSource>,
    store: RecordStore,
    base_url: String,
    delay: Duration,
    progress: ProgressBar,
}

impl Crawler {
    pub fn new(source: Box<dyn CatalogSource>, store: RecordStore, base_url: impl Into<String>) -> Self {
        Self {
            source,
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            delay: Duration::ZERO,
            progress: ProgressBar::hidden(),
        }
    }

    /// 設定から PokeAPI 向けのクローラーを作成
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        let client = PokeApiClient::new(&config.http, config.retry)?;
        Ok(Self::new(
            Box::new(client),
            RecordStore::new(&config.data_dir),
            &config.base_url,
        )
        .with_delay(config.delay))
    }

    /// エントリ間の待ち時間
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 進捗バーを表示する
    pub fn with_progress(mut self, total: u64) -> Self {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        self.progress = pb;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn say(&self, line: String) {
        self.progress.suspend(|| println!("{line}"));
    }

    fn warn(&self, line: String) {
        self.progress.suspend(|| eprintln!("{line}"));
    }

    /// 公開済みの最大id（取得できなければ既定値）
    pub async fn max_id(&self) -> u32 {
        let url = self.url("pokemon-species?limit=10000");
        match self.source.fetch_json(&url).await {
            Ok(Some(list)) => match normalize::max_species_id(&list) {
                Some(max) => {
                    self.say(output::success(&format!("Found species list, max ID: {max}")));
                    max
                }
                None => {
                    self.warn(output::warning(&format!(
                        "Species list is empty, using fallback limit of {FALLBACK_MAX_ID}"
                    )));
                    FALLBACK_MAX_ID
                }
            },
            Ok(None) => {
                self.warn(output::warning(&format!(
                    "Could not fetch species list, using fallback limit of {FALLBACK_MAX_ID}"
                )));
                FALLBACK_MAX_ID
            }
            Err(e) => {
                self.warn(output::warning(&format!(
                    "Error checking species count: {e}, using fallback limit of {FALLBACK_MAX_ID}"
                )));
                FALLBACK_MAX_ID
            }
        }
    }

    /// 進化チェーン（失敗時は空）
    async fn fetch_evolution_chain(&self, url: &str) -> Vec<crate::catalog::record::EvolutionStep> {
        let result = match self.source.fetch_json(url).await {
            Ok(Some(payload)) => normalize::evolution_chain(&payload),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            self.warn(output::warning(&format!("Error fetching evolution chain: {e}")));
            Vec::new()
        })
    }

    /// 出現場所（失敗時は空）
    async fn fetch_locations(&self, id: u32) -> crate::catalog::record::LocationsByGame {
        let url = self.url(&format!("pokemon/{id}/encounters"));
        match self.source.fetch_json(&url).await {
            Ok(Some(encounters)) => normalize::locations(&encounters),
            Ok(None) => Default::default(),
            Err(e) => {
                self.warn(output::warning(&format!(
                    "Error fetching locations for #{id}: {e}"
                )));
                Default::default()
            }
        }
    }

    /// 1エントリ分を取得して正規化（存在しなければ None）
    pub async fn fetch_record(&self, id: u32) -> Result<Option<CatalogRecord>> {
        let Some(pokemon) = self.source.fetch_json(&self.url(&format!("pokemon/{id}"))).await?
        else {
            return Ok(None);
        };

        let species = self
            .source
            .fetch_json(&self.url(&format!("pokemon-species/{id}")))
            .await?
            .ok_or_else(|| DexError::MalformedPayload(format!("species #{id} not found")))?;

        let evolution_url = species
            .pointer("/evolution_chain/url")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let evolution_chain = if evolution_url.is_empty() {
            Vec::new()
        } else {
            self.fetch_evolution_chain(evolution_url).await
        };

        let locations = self.fetch_locations(id).await;

        normalize::record(&pokemon, &species, evolution_chain, locations).map(Some)
    }

    /// 1エントリを取得して保存。保存できたら true
    async fn crawl_one(&self, id: u32) -> bool {
        self.progress.set_message(format!("#{id}"));
        match self.fetch_record(id).await {
            Ok(Some(record)) => match self.store.write(&record) {
                Ok(_) => {
                    self.say(output::success(&format!("Saved #{id} - {}", record.name)));
                    true
                }
                Err(e) => {
                    self.warn(output::failure(&format!("Failed to save #{id}: {e}")));
                    false
                }
            },
            Ok(None) => {
                self.warn(output::warning(&format!("#{id} not found (skipping)")));
                false
            }
            Err(e) => {
                self.warn(output::failure(&format!("Error fetching #{id}: {e}")));
                false
            }
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// `start..=limit` を順に取得（保存済みはスキップ）し、index を再生成する
    pub async fn run(&self, start: u32, limit: FetchLimit) -> Result<CrawlReport> {
        self.store.ensure_dirs()?;

        let last = match limit {
            FetchLimit::UpTo(n) => n,
            FetchLimit::All => self.max_id().await,
        };

        let existing = self.store.existing_ids()?;
        self.say(output::info(&format!(
            "Found {} existing records, fetching #{start} to #{last}",
            existing.len()
        )));

        let mut report = CrawlReport::default();
        for id in start..=last {
            self.progress.inc(1);
            if existing.contains(&id) {
                report.already_existed += 1;
                self.say(output::skipped(&format!("Skipping #{id} (already exists)")));
                continue;
            }

            if self.crawl_one(id).await {
                report.saved.push(id);
            } else {
                report.missing.push(id);
            }
            self.pause().await;
        }
        self.progress.finish_and_clear();

        report.indexed = self.finish(&report)?;
        Ok(report)
    }

    /// 指定idを保存済みかどうかに関わらず取り直す
    pub async fn retry(&self, ids: &[u32]) -> Result<CrawlReport> {
        self.store.ensure_dirs()?;
        self.say(output::info(&format!("Retrying {} entries", ids.len())));

        let mut report = CrawlReport::default();
        for &id in ids {
            self.progress.inc(1);
            if self.crawl_one(id).await {
                report.saved.push(id);
            } else {
                report.missing.push(id);
            }
            self.pause().await;
        }
        self.progress.finish_and_clear();

        report.indexed = self.finish(&report)?;
        Ok(report)
    }

    /// index と実行記録を書き出し、index 件数を返す
    fn finish(&self, report: &CrawlReport) -> Result<usize> {
        let entries = self.store.rebuild_index()?;
        self.store.write_meta(&RunMeta {
            crawled_at: chrono::Utc::now(),
            saved: report.saved.len(),
            already_existed: report.already_existed,
            missing: report.missing.len(),
            total_records: entries.len(),
        })?;
        Ok(entries.len())
    }
}

#[cfg(test)]
#[path = "crawler_test.rs"]
mod tests;
