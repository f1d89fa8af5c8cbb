//! Organic search result model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One organic (non-paid) result as returned by the search API.
///
/// Only `link` and `title` are interpreted; every other field the API sends is
/// kept in `extra` so cached entries hold the raw result objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Result URL
    pub link: String,

    /// Page title (occasionally missing or null upstream)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrganicResult {
    /// Build a result with no extra fields
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: Some(title.into()),
            extra: Map::new(),
        }
    }
}

/// Body of a `GET /search` response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Absent when the search produced nothing
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}
