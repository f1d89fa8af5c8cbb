//! Search result display models

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::search::{Combination, SearchResult, Verdict};

/// Longest URL shown in a table cell
const URL_WIDTH: usize = 80;

/// Longest title shown in a table cell
const TITLE_WIDTH: usize = 60;

/// One ranked result, for the per-combination table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResultDisplay {
    #[tabled(rename = "RANK")]
    pub rank: usize,

    #[tabled(rename = "URL")]
    pub url: String,

    #[tabled(rename = "TITLE")]
    pub title: String,
}

impl From<&SearchResult> for ResultDisplay {
    fn from(result: &SearchResult) -> Self {
        Self {
            rank: result.rank,
            url: truncate_string(&result.url, URL_WIDTH),
            title: truncate_string(&result.title, TITLE_WIDTH),
        }
    }
}

/// One ranked result with its combination, for the flat table format.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResultRowDisplay {
    #[tabled(rename = "KEYWORD")]
    pub keyword: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "RANK")]
    pub rank: usize,

    #[tabled(rename = "URL")]
    pub url: String,

    #[tabled(rename = "TITLE")]
    pub title: String,
}

impl ResultRowDisplay {
    pub fn new(combination: &Combination, result: &SearchResult) -> Self {
        let display = ResultDisplay::from(result);
        Self {
            keyword: combination.keyword.clone(),
            location: combination.location.clone(),
            rank: display.rank,
            url: display.url,
            title: display.title,
        }
    }
}

/// One ranking check, for the flat table format.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VerdictDisplay {
    #[tabled(rename = "KEYWORD")]
    pub keyword: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "CHECK")]
    pub check: String,

    #[tabled(rename = "TARGET")]
    pub target: String,

    #[tabled(rename = "RANK")]
    pub rank: String,

    #[tabled(rename = "MATCHED URL")]
    pub matched_url: String,
}

impl VerdictDisplay {
    pub fn new(combination: &Combination, verdict: &Verdict) -> Self {
        let (check, target, rank, matched_url) = match verdict {
            Verdict::ExactUrl { url, rank, .. } => (
                "url",
                url.clone(),
                *rank,
                rank.map(|_| url.clone()),
            ),
            Verdict::Domain {
                domain,
                substring,
                found,
                ..
            } => (
                if *substring { "domain-contains" } else { "domain" },
                domain.clone(),
                found.as_ref().map(|hit| hit.rank),
                found.as_ref().map(|hit| hit.url.clone()),
            ),
        };

        Self {
            keyword: combination.keyword.clone(),
            location: combination.location.clone(),
            check: check.to_string(),
            target: truncate_string(&target, URL_WIDTH),
            rank: rank.map_or_else(|| "-".to_string(), |r| r.to_string()),
            matched_url: matched_url
                .map(|u| truncate_string(&u, URL_WIDTH))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
