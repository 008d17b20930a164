use clap::{Parser, Subcommand};

use crate::commands::{crawl, index, retry, search, show, suggest};

#[derive(Debug, Parser)]
#[command(name = "catdex")]
#[command(about = "Catalog crawler and filter CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// APIからカタログを取得して保存
    #[command(
        about = "Fetch catalog entries from the API",
        after_help = "ENVIRONMENT:\n  FETCH_ALL=1        same as --all\n  START_INDEX=N      same as --start\n  CATDEX_DATA_DIR    same as --data-dir"
    )]
    Crawl(crawl::Args),

    /// 指定idを再取得
    #[command(about = "Re-fetch specific entries and overwrite them")]
    Retry(retry::Args),

    /// 保存済みレコードから index.json を再生成
    #[command(about = "Rebuild index.json from the saved records")]
    Index(index::Args),

    /// カタログを絞り込み検索
    #[command(
        about = "Filter the catalog",
        after_help = "QUERY STRING:\n  --url accepts a shared query string such as '?search=pika&types=electric&gen=1&sort=name'.\n  Explicit flags override the values it carries."
    )]
    Search(search::Args),

    /// エントリの詳細表示
    #[command(about = "Show the details of an entry by id or name")]
    Show(show::Args),

    /// 名前・idの部分一致候補
    #[command(about = "Suggest entries whose name or id contains the query")]
    Suggest(suggest::Args),
}
