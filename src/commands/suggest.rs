//! catdex suggest コマンド
//!
//! ヘッダー検索ボックスと同じ部分一致で候補を出す。

use crate::catalog::{display_id, Catalog};
use crate::config::resolve_data_dir;
use crate::filter::{quick_search, DEFAULT_QUICK_LIMIT};
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// 名前またはidの一部
    pub query: String,

    /// 最大件数
    #[arg(long, default_value_t = DEFAULT_QUICK_LIMIT)]
    pub limit: usize,

    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<(), String> {
    let index_path = resolve_data_dir(args.data_dir).join("index.json");
    let catalog = Catalog::load(&index_path)
        .map_err(|e| format!("Failed to load {}: {}", index_path.display(), e))?;

    let hits = quick_search(catalog.entries(), &args.query, args.limit);
    if hits.is_empty() {
        println!("No suggestions");
        return Ok(());
    }

    for entry in hits {
        println!(
            "{}  {}",
            format!("#{}", display_id(entry.id, 4)).dimmed(),
            entry.name
        );
    }
    Ok(())
}
