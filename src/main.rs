//! serprank - check where a URL ranks for keyword + location searches

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod search;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match &cli.command {
        Commands::Search(args) => cli::search::run(&opts, args).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts).await,
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("serprank version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Warnings by default, debug for this crate with --debug; RUST_LOG wins over both
fn init_logging(debug: bool) {
    let default_filter = if debug { "serprank=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
