//! Mock search API client for testing
//!
//! Provides a mock implementation of [`SerpApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

use super::{OrganicResult, SerpApi};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses per keyword via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSerpClient::new()
///     .with_results("plombier", vec![OrganicResult::new("https://a.example/", "A")])
///     .await
///     .failing_for("serrurier")
///     .await;
/// ```
#[derive(Default)]
pub struct MockSerpClient {
    /// Results to return, keyed by keyword
    results: Mutex<HashMap<String, Vec<OrganicResult>>>,
    /// Keywords whose search fails with a server error
    failing: Mutex<HashSet<String>>,
    /// Captured requests for test assertions
    captured_requests: Mutex<Vec<CapturedRequest>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub keyword: String,
    pub location: String,
    pub api_key: String,
}

impl MockSerpClient {
    /// Create a new mock client; unknown keywords return no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure results returned for a keyword.
    pub async fn with_results(self, keyword: &str, results: Vec<OrganicResult>) -> Self {
        self.results
            .lock()
            .await
            .insert(keyword.to_string(), results);
        self
    }

    /// Make searches for a keyword fail.
    pub async fn failing_for(self, keyword: &str) -> Self {
        self.failing.lock().await.insert(keyword.to_string());
        self
    }

    /// Number of API calls made so far.
    pub async fn call_count(&self) -> usize {
        self.captured_requests.lock().await.len()
    }

    /// All requests made so far, in order.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl SerpApi for MockSerpClient {
    async fn organic_results(
        &self,
        keyword: &str,
        location: &str,
        api_key: &str,
    ) -> Result<Vec<OrganicResult>> {
        self.captured_requests.lock().await.push(CapturedRequest {
            keyword: keyword.to_string(),
            location: location.to_string(),
            api_key: api_key.to_string(),
        });

        if self.failing.lock().await.contains(keyword) {
            return Err(ApiError::ServerError(format!("mock failure for {}", keyword)).into());
        }

        Ok(self
            .results
            .lock()
            .await
            .get(keyword)
            .cloned()
            .unwrap_or_default())
    }
}

/// Results `https://<host>/` titled after the host, in the given order.
pub fn results_for_hosts(hosts: &[&str]) -> Vec<OrganicResult> {
    hosts
        .iter()
        .map(|host| OrganicResult::new(format!("https://{}/", host), host.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_results() {
        let mock = MockSerpClient::new()
            .with_results("plombier", results_for_hosts(&["a.com", "b.com"]))
            .await;

        let results = mock.organic_results("plombier", "Paris", "k").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].link, "https://b.com/");

        let none = mock.organic_results("other", "Paris", "k").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_mock_failure_and_capture() {
        let mock = MockSerpClient::new().failing_for("broken").await;

        assert!(mock.organic_results("broken", "Lyon", "k").await.is_err());
        assert_eq!(mock.call_count().await, 1);
        assert_eq!(
            mock.captured_requests().await[0],
            CapturedRequest {
                keyword: "broken".to_string(),
                location: "Lyon".to_string(),
                api_key: "k".to_string(),
            }
        );
    }
}
