mod catalog;
mod cli;
mod commands;
mod config;
mod crawler;
mod env;
mod error;
mod filter;
mod http;
mod output;
mod query;
mod typechart;
mod vocabulary;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
