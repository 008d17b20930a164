//! catdex crawl コマンド
//!
//! APIから順番にエントリを取得し、データディレクトリへ保存する。

use crate::config::{resolve_data_dir, CrawlConfig, FetchLimit};
use crate::crawler::{CrawlReport, Crawler};
use crate::output::CommandSummary;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
pub struct Args {
    /// 公開済みの最大idまで取得
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// 開始id
    #[arg(long)]
    pub start: Option<u32>,

    /// 最終id
    #[arg(long)]
    pub limit: Option<u32>,

    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// エントリ間の待ち時間（ミリ秒）
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// APIのベースURL
    #[arg(long, hide = true)]
    pub base_url: Option<String>,
}

/// 環境変数の上にフラグを重ねる
pub fn build_config(args: &Args) -> CrawlConfig {
    let mut config = CrawlConfig::from_env();
    config.data_dir = resolve_data_dir(args.data_dir.clone());
    if args.all {
        config.limit = FetchLimit::All;
    }
    if let Some(limit) = args.limit {
        config.limit = FetchLimit::UpTo(limit);
    }
    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(ms) = args.delay_ms {
        config.delay = Duration::from_millis(ms);
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    config
}

pub async fn run(args: Args) -> Result<(), String> {
    let config = build_config(&args);
    config.validate().map_err(|e| e.to_string())?;

    let crawler = Crawler::from_config(&config).map_err(|e| e.to_string())?;

    // 進捗バーの長さを決めるため、先に最終idを確定
    let last = match config.limit {
        FetchLimit::UpTo(n) => n,
        FetchLimit::All => crawler.max_id().await,
    };
    if last < config.start {
        return Err(format!(
            "Nothing to fetch: start #{} is beyond #{}",
            config.start, last
        ));
    }

    let crawler = crawler.with_progress(u64::from(last - config.start + 1));
    let report = crawler
        .run(config.start, FetchLimit::UpTo(last))
        .await
        .map_err(|e| e.to_string())?;

    print_report(&report, &config);
    Ok(())
}

pub(crate) fn print_report(report: &CrawlReport, config: &CrawlConfig) {
    println!(
        "{}",
        CommandSummary::format(report.saved.len(), report.already_existed, report.missing.len())
    );
    if !report.missing.is_empty() {
        let ids: Vec<String> = report.missing.iter().map(u32::to_string).collect();
        println!("  Missing: {}", ids.join(", "));
        println!("  Re-fetch with: catdex retry {}", ids.join(" "));
    }
    println!(
        "  Index: {} entries in {}",
        report.indexed,
        config.index_path().display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn args() -> Args {
        Args {
            all: false,
            start: None,
            limit: None,
            data_dir: None,
            delay_ms: None,
            base_url: None,
        }
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        std::env::set_var("START_INDEX", "10");
        std::env::set_var("FETCH_ALL", "true");

        let config = build_config(&Args {
            start: Some(152),
            limit: Some(251),
            delay_ms: Some(0),
            data_dir: Some(PathBuf::from("/tmp/dex")),
            ..args()
        });
        assert_eq!(config.start, 152);
        assert_eq!(config.limit, FetchLimit::UpTo(251));
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dex"));

        std::env::remove_var("START_INDEX");
        std::env::remove_var("FETCH_ALL");
    }

    #[test]
    #[serial]
    fn test_env_applies_without_flags() {
        std::env::set_var("START_INDEX", "10");
        std::env::set_var("FETCH_ALL", "1");

        let config = build_config(&args());
        assert_eq!(config.start, 10);
        assert_eq!(config.limit, FetchLimit::All);

        std::env::remove_var("START_INDEX");
        std::env::remove_var("FETCH_ALL");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let config = build_config(&args());
        assert_eq!(config.start, 1);
        assert_eq!(config.limit, FetchLimit::UpTo(151));
    }
}
