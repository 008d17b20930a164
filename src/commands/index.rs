//! catdex index コマンド

use crate::config::resolve_data_dir;
use crate::crawler::RecordStore;
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<(), String> {
    let store = RecordStore::new(resolve_data_dir(args.data_dir));
    let entries = store.rebuild_index().map_err(|e| e.to_string())?;

    println!(
        "{} Indexed {} entries into {}",
        "✓".green(),
        entries.len(),
        store.index_path().display()
    );

    if let Ok(Some(meta)) = store.load_meta() {
        println!(
            "  Last crawl: {}",
            meta.crawled_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}
