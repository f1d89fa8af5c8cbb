//! Cached wrapper for the search API client
//!
//! Every lookup goes through the cache first; the API is only called on a
//! miss, and a successful response is written back before it is returned.

use std::time::Duration;

use crate::cache::{CacheStorage, cache_key};
use crate::client::{OrganicResult, SerpApi};
use crate::error::{InputError, Result};

/// Results of one lookup and where they came from
#[derive(Debug, Clone)]
pub struct Fetched {
    pub results: Vec<OrganicResult>,
    pub from_cache: bool,
}

/// Cached wrapper for any SerpApi implementation.
///
/// The cache can be disabled by passing `None` (for `--no-cache`), in which
/// case every lookup goes to the API and nothing is written.
pub struct CachedSerpClient<C: SerpApi> {
    inner: C,
    cache: Option<CacheStorage>,
    ttl: Duration,
}

impl<C: SerpApi> CachedSerpClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `cache` - Storage to read and write, or `None` to bypass caching
    /// * `ttl` - Lifetime of entries written by this client
    pub fn new(inner: C, cache: Option<CacheStorage>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Get the inner client
    #[cfg(test)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Fetch the organic results for a combination, serving from cache when fresh.
    pub async fn fetch_top_results(
        &self,
        keyword: &str,
        location: &str,
        api_key: &str,
    ) -> Result<Fetched> {
        if api_key.trim().is_empty() {
            return Err(InputError::MissingApiKey.into());
        }

        let key = cache_key(keyword, location, api_key);

        if let Some(ref cache) = self.cache
            && let Some(results) = cache.get::<Vec<OrganicResult>>(&key)
        {
            log::debug!("Cache hit: {:?} in {:?}", keyword, location);
            return Ok(Fetched {
                results,
                from_cache: true,
            });
        }

        log::debug!("Cache miss: {:?} in {:?}", keyword, location);
        let results = self
            .inner
            .organic_results(keyword, location, api_key)
            .await?;

        if let Some(ref cache) = self.cache
            && let Err(e) = cache.put(&key, &results, self.ttl)
        {
            log::warn!("Failed to cache results for {:?}: {}", keyword, e);
        }

        Ok(Fetched {
            results,
            from_cache: false,
        })
    }
}
