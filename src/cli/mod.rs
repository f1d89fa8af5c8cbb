//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod cache;
pub mod context;
pub mod init;
pub mod search;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::search::{DEFAULT_DISPLAY_LIMIT, MatchMode};

/// serprank - check where a URL ranks for keyword + location searches
#[derive(Parser, Debug)]
#[command(name = "serprank")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "SERPRANK_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SERPRANK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override cache directory
    #[arg(long, global = true, env = "SERPRANK_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SERPRANK_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the results cache, always query the API
    #[arg(long, global = true, env = "SERPRANK_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Search API host (for testing against a local server)
    #[arg(
        long,
        global = true,
        env = "SERPRANK_API_HOST",
        hide_env = true,
        hide = true
    )]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search keyword + location combinations and check where a URL ranks
    #[command(
        visible_alias = "s",
        after_help = "EXAMPLES:\n  \
            serprank search -c \"plombier\" \"Paris,France\"\n  \
            serprank search -c plombier Paris -c serrurier Lyon --target https://y.com/\n  \
            serprank search --input combos.yaml --target y.com --match domain"
    )]
    Search(SearchArgs),

    /// Manage the local results cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Save an API key and cache settings
    Init,

    /// Show resolved configuration
    Status,

    /// Display version information
    Version,
}

/// Arguments for `serprank search`
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword and location to search from (repeatable)
    #[arg(
        short = 'c',
        long = "combo",
        num_args = 2,
        value_names = ["KEYWORD", "LOCATION"]
    )]
    pub combos: Vec<String>,

    /// YAML file with a list of `keyword`/`location` entries
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// ValueSERP API key (falls back to the config file)
    #[arg(long, env = "SERPRANK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Your URL or domain to look for in the results
    #[arg(short, long, value_name = "URL")]
    pub target: Option<String>,

    /// Which checks to run against the target
    #[arg(long = "match", value_enum, default_value = "both")]
    pub match_mode: MatchMode,

    /// Results shown per combination
    #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub top: usize,

    /// Cache lifetime in seconds for results fetched by this run
    #[arg(long, env = "SERPRANK_CACHE_TTL", hide_env = true)]
    pub cache_ttl: Option<u64>,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Delete every cached result
    Clear,
    /// Print the cache directory
    Path,
}
