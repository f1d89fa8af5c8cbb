//! Command execution context
//!
//! Loads the config file once, layers the flag/env overrides on top, and
//! builds the search service every command runs against.

use std::path::PathBuf;

use crate::cache::{CacheStorage, CachedSerpClient};
use crate::cli::args::GlobalOptions;
use crate::cli::OutputFormat;
use crate::client::ValueSerpClient;
use crate::config::Config;
use crate::error::Result;
use crate::search::SearchService;

/// Context for command execution containing config, service, and runtime options.
pub struct CommandContext {
    /// Config file contents with flag/env overrides applied
    pub config: Config,
    /// Where the config was loaded from (it may not exist yet)
    pub config_path: PathBuf,
    /// Cached search service
    pub service: SearchService<ValueSerpClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build a context from global options.
    ///
    /// `ttl_override` replaces the configured cache TTL for this run only.
    ///
    /// # Errors
    /// Returns error if the config file is invalid or no cache directory can
    /// be determined.
    pub fn new(opts: &GlobalOptions, ttl_override: Option<u64>) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(host) = opts.api_host_ref() {
            config.api_host = Some(host.to_string());
            config.validate()?;
        }
        if let Some(ttl) = ttl_override {
            config.cache_ttl_secs = ttl;
        }

        let storage = resolve_storage(opts, &config)?;
        let raw_client = ValueSerpClient::with_host(Some(config.api_host()))?;
        log::debug!(
            "Using API host {} with cache at {} (ttl {}s, enabled: {})",
            raw_client.base_url(),
            storage.dir().display(),
            config.cache_ttl_secs,
            !opts.no_cache
        );

        // Wrap with caching layer (disabled if --no-cache)
        let cache = (!opts.no_cache).then(|| storage.clone());
        let client = CachedSerpClient::new(raw_client, cache, config.cache_ttl());

        Ok(Self {
            config,
            config_path,
            service: SearchService::new(client, storage),
            format: opts.format,
        })
    }

    /// API key from the flag/env value, falling back to the config file
    pub fn api_key(&self, flag: Option<&str>) -> Option<String> {
        flag.filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.config.api_key.clone())
    }
}

/// Cache storage from `--cache-dir`, then the config file, then the platform default
pub fn resolve_storage(opts: &GlobalOptions, config: &Config) -> Result<CacheStorage> {
    match opts.cache_dir.as_ref().or(config.cache_dir.as_ref()) {
        Some(dir) => Ok(CacheStorage::open_at(dir)),
        None => Ok(CacheStorage::open()?),
    }
}
