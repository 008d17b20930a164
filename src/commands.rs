use crate::cli::Command;

pub mod crawl;
pub mod index;
pub mod retry;
pub mod search;
pub mod show;
pub mod suggest;

pub async fn dispatch(cli: crate::cli::Cli) -> Result<(), String> {
    match cli.command {
        Command::Crawl(args) => crawl::run(args).await,
        Command::Retry(args) => retry::run(args).await,
        Command::Index(args) => index::run(args).await,
        Command::Search(args) => search::run(args).await,
        Command::Show(args) => show::run(args).await,
        Command::Suggest(args) => suggest::run(args).await,
    }
}
