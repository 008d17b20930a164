//! catdex retry コマンド
//!
//! 指定したidを保存済みかどうかに関わらず取り直す。

use crate::commands::crawl::print_report;
use crate::config::{resolve_data_dir, CrawlConfig};
use crate::crawler::Crawler;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// 取り直すid
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<u32>,

    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<(), String> {
    if args.ids.contains(&0) {
        return Err("ids must be at least 1".to_string());
    }

    let config = CrawlConfig {
        data_dir: resolve_data_dir(args.data_dir),
        ..CrawlConfig::default()
    };

    let crawler = Crawler::from_config(&config)
        .map_err(|e| e.to_string())?
        .with_progress(args.ids.len() as u64);
    let report = crawler.retry(&args.ids).await.map_err(|e| e.to_string())?;

    print_report(&report, &config);
    Ok(())
}
