//! Search engine results API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod valueserp;

#[cfg(test)]
pub use mock::MockSerpClient;
pub use models::OrganicResult;
pub use valueserp::ValueSerpClient;

/// Number of results requested from the API for every search
pub const RESULT_COUNT: usize = 30;

/// Search results API
#[async_trait]
pub trait SerpApi: Send + Sync {
    /// Fetch the organic results for a keyword searched from a location.
    ///
    /// Issues exactly one request; nothing is retried.
    async fn organic_results(
        &self,
        keyword: &str,
        location: &str,
        api_key: &str,
    ) -> Result<Vec<OrganicResult>>;
}
