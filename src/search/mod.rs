//! Batch searches over keyword + location combinations
//!
//! The CLI builds a [`Command`] and hands it to [`SearchService`]; nothing in
//! this module prints or prompts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::OrganicResult;

pub mod batch;
pub mod command;
pub mod matching;

pub use batch::{BatchReport, OutcomeStatus, SearchBatch};
pub use command::{Command, CommandOutcome, SearchService};
pub use matching::{MatchMode, Verdict};

/// Most combinations accepted in one batch
pub const MAX_COMBINATIONS: usize = 15;

/// Results shown per combination unless told otherwise
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// One keyword searched from one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub location: String,
}

impl Combination {
    pub fn new(keyword: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().trim().to_string(),
            location: location.into().trim().to_string(),
        }
    }

    /// Only combinations with both fields filled in are searched
    pub fn is_eligible(&self) -> bool {
        !self.keyword.trim().is_empty() && !self.location.trim().is_empty()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.keyword, self.location)
    }
}

/// A ranked result, rank starting at 1 in API order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub rank: usize,
    pub url: String,
    pub title: String,
}

/// Number the raw results in the order the API returned them
pub fn rank_results(results: &[OrganicResult]) -> Vec<SearchResult> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| SearchResult {
            rank: i + 1,
            url: r.link.clone(),
            title: r.title.clone().unwrap_or_default(),
        })
        .collect()
}
