//! Sequential batch search
//!
//! Combinations run one after the other in input order. A failure is recorded
//! against its own combination and the batch moves on.

use serde::{Serialize, Serializer};

use super::matching::{self, MatchMode, Verdict};
use super::{Combination, DEFAULT_DISPLAY_LIMIT, MAX_COMBINATIONS, SearchResult, rank_results};
use crate::cache::CachedSerpClient;
use crate::client::SerpApi;
use crate::error::InputError;

/// Everything needed to run one search batch
#[derive(Debug, Clone)]
pub struct SearchBatch {
    pub combinations: Vec<Combination>,
    pub api_key: Option<String>,
    /// URL or domain to look for in each result list
    pub target: Option<String>,
    pub mode: MatchMode,
    /// Results kept per combination for display
    pub top: usize,
}

impl SearchBatch {
    pub fn new(combinations: Vec<Combination>, api_key: Option<String>) -> Self {
        Self {
            combinations,
            api_key,
            target: None,
            mode: MatchMode::default(),
            top: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_target(mut self, target: Option<String>, mode: MatchMode) -> Self {
        self.target = target.filter(|t| !t.trim().is_empty());
        self.mode = mode;
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }
}

/// Result of running a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Problems with the batch as a whole; when present nothing was searched
    #[serde(serialize_with = "serialize_messages")]
    pub input_errors: Vec<InputError>,
    /// Combinations dropped for a missing keyword or location
    pub skipped: usize,
    pub outcomes: Vec<CombinationOutcome>,
}

impl BatchReport {
    /// Number of combinations whose search failed
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed { .. }))
            .count()
    }
}

/// What happened to one combination
#[derive(Debug, Clone, Serialize)]
pub struct CombinationOutcome {
    pub combination: Combination,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Found {
        /// The first `top` results
        results: Vec<SearchResult>,
        /// Results returned by the API, all of which were checked
        total: usize,
        from_cache: bool,
        verdicts: Vec<Verdict>,
    },
    Failed {
        error: String,
    },
}

fn serialize_messages<S: Serializer>(errors: &[InputError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// Run every eligible combination of `batch` in order.
///
/// `on_start` is called with the 0-based index, the number of eligible
/// combinations, and the combination, just before each lookup.
pub async fn run_batch<C: SerpApi>(
    client: &CachedSerpClient<C>,
    batch: &SearchBatch,
    mut on_start: impl FnMut(usize, usize, &Combination),
) -> BatchReport {
    let mut report = BatchReport::default();

    let eligible: Vec<&Combination> = batch
        .combinations
        .iter()
        .filter(|c| {
            let ok = c.is_eligible();
            if !ok {
                log::debug!("Skipping incomplete combination {:?}", c);
            }
            ok
        })
        .collect();
    report.skipped = batch.combinations.len() - eligible.len();

    if eligible.is_empty() {
        report.input_errors.push(InputError::NoCombinations);
        return report;
    }
    if eligible.len() > MAX_COMBINATIONS {
        report.input_errors.push(InputError::TooManyCombinations {
            given: eligible.len(),
            max: MAX_COMBINATIONS,
        });
        return report;
    }
    let Some(api_key) = batch.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        report.input_errors.push(InputError::MissingApiKey);
        return report;
    };

    let total = eligible.len();
    for (index, combination) in eligible.into_iter().enumerate() {
        on_start(index, total, combination);

        let status = match client
            .fetch_top_results(&combination.keyword, &combination.location, api_key)
            .await
        {
            Ok(fetched) => {
                let ranked = rank_results(&fetched.results);
                let verdicts = match &batch.target {
                    Some(target) => matching::evaluate(&ranked, target, batch.mode),
                    None => Vec::new(),
                };
                OutcomeStatus::Found {
                    total: ranked.len(),
                    results: ranked.into_iter().take(batch.top).collect(),
                    from_cache: fetched.from_cache,
                    verdicts,
                }
            }
            Err(e) => {
                log::debug!("Search failed for {}: {}", combination, e);
                OutcomeStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        report.outcomes.push(CombinationOutcome {
            combination: combination.clone(),
            status,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStorage;
    use crate::client::MockSerpClient;
    use crate::client::mock::results_for_hosts;
    use std::time::Duration;
    use tempfile::TempDir;

    const DAY: Duration = Duration::from_secs(86400);

    fn combos(keywords: &[&str]) -> Vec<Combination> {
        keywords
            .iter()
            .map(|kw| Combination::new(*kw, "Paris,France"))
            .collect()
    }

    async fn client_with(mock: MockSerpClient) -> (CachedSerpClient<MockSerpClient>, TempDir) {
        let dir = TempDir::new().unwrap();
        let client = CachedSerpClient::new(mock, Some(CacheStorage::open_at(dir.path())), DAY);
        (client, dir)
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let mut mock = MockSerpClient::new();
        for kw in ["k1", "k2", "k4", "k5"] {
            mock = mock.with_results(kw, results_for_hosts(&["a.com"])).await;
        }
        let mock = mock.failing_for("k3").await;
        let (client, _dir) = client_with(mock).await;

        let batch = SearchBatch::new(combos(&["k1", "k2", "k3", "k4", "k5"]), Some("key".into()));
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        assert!(report.input_errors.is_empty());
        assert_eq!(report.outcomes.len(), 5);
        assert_eq!(report.failures(), 1);

        for (i, outcome) in report.outcomes.iter().enumerate() {
            match (&outcome.status, i) {
                (OutcomeStatus::Failed { error }, 2) => assert!(error.contains("k3")),
                (OutcomeStatus::Found { results, .. }, i) if i != 2 => {
                    assert_eq!(results.len(), 1)
                }
                (status, i) => panic!("Unexpected status {:?} at {}", status, i),
            }
        }
        assert_eq!(client.inner().call_count().await, 5);
    }

    #[tokio::test]
    async fn test_no_eligible_combinations_makes_no_calls() {
        let (client, _dir) = client_with(MockSerpClient::new()).await;

        let batch = SearchBatch::new(
            vec![
                Combination::new("plombier", ""),
                Combination::new("", "Lyon"),
                Combination::new("", ""),
            ],
            Some("key".into()),
        );
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        assert_eq!(report.input_errors, vec![InputError::NoCombinations]);
        assert_eq!(report.skipped, 3);
        assert!(report.outcomes.is_empty());
        assert_eq!(client.inner().call_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_calls() {
        let (client, _dir) = client_with(MockSerpClient::new()).await;

        let batch = SearchBatch::new(combos(&["k1", "k2"]), None);
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        assert_eq!(report.input_errors, vec![InputError::MissingApiKey]);
        assert!(report.outcomes.is_empty());
        assert_eq!(client.inner().call_count().await, 0);
    }

    #[tokio::test]
    async fn test_too_many_combinations() {
        let (client, _dir) = client_with(MockSerpClient::new()).await;
        let keywords: Vec<String> = (0..16).map(|i| format!("kw{}", i)).collect();
        let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();

        let batch = SearchBatch::new(combos(&refs), Some("key".into()));
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        assert_eq!(
            report.input_errors,
            vec![InputError::TooManyCombinations { given: 16, max: 15 }]
        );
        assert_eq!(client.inner().call_count().await, 0);
    }

    #[tokio::test]
    async fn test_incomplete_combinations_are_skipped_in_order() {
        let (client, _dir) = client_with(MockSerpClient::new()).await;
        let batch = SearchBatch::new(
            vec![
                Combination::new("first", "Paris"),
                Combination::new("", "Lyon"),
                Combination::new("second", "Nice"),
            ],
            Some("key".into()),
        );

        let mut started = Vec::new();
        let report = run_batch(&client, &batch, |i, total, c| {
            started.push((i, total, c.keyword.clone()))
        })
        .await;

        assert_eq!(report.skipped, 1);
        assert_eq!(
            started,
            vec![(0, 2, "first".to_string()), (1, 2, "second".to_string())]
        );
        let requests = client.inner().captured_requests().await;
        assert_eq!(requests[0].location, "Paris");
        assert_eq!(requests[1].location, "Nice");
    }

    #[tokio::test]
    async fn test_display_truncated_but_matching_scans_all() {
        let hosts: Vec<String> = (1..=30).map(|i| format!("site{}.com", i)).collect();
        let refs: Vec<&str> = hosts.iter().map(String::as_str).collect();
        let mock = MockSerpClient::new()
            .with_results("kw", results_for_hosts(&refs))
            .await;
        let (client, _dir) = client_with(mock).await;

        let batch = SearchBatch::new(combos(&["kw"]), Some("key".into()))
            .with_target(Some("https://site25.com/".into()), MatchMode::Both);
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        match &report.outcomes[0].status {
            OutcomeStatus::Found {
                results,
                total,
                verdicts,
                ..
            } => {
                assert_eq!(results.len(), 20);
                assert_eq!(*total, 30);
                assert_eq!(verdicts.len(), 2);
                assert!(verdicts.iter().all(Verdict::is_hit));
                assert!(verdicts[0].to_string().contains("#25"));
            }
            other => panic!("Expected results, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_run_served_from_cache() {
        let mock = MockSerpClient::new()
            .with_results("kw", results_for_hosts(&["a.com"]))
            .await;
        let (client, _dir) = client_with(mock).await;
        let batch = SearchBatch::new(combos(&["kw"]), Some("key".into()));

        run_batch(&client, &batch, |_, _, _| {}).await;
        let report = run_batch(&client, &batch, |_, _, _| {}).await;

        assert!(matches!(
            report.outcomes[0].status,
            OutcomeStatus::Found {
                from_cache: true,
                ..
            }
        ));
        assert_eq!(client.inner().call_count().await, 1);
    }

    #[test]
    fn test_blank_target_is_ignored() {
        let batch = SearchBatch::new(vec![], None).with_target(Some("  ".into()), MatchMode::Exact);
        assert!(batch.target.is_none());
    }

    #[test]
    fn test_report_serializes_error_messages() {
        let report = BatchReport {
            input_errors: vec![InputError::NoCombinations],
            ..Default::default()
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(
            json["input_errors"][0]
                .as_str()
                .unwrap()
                .contains("No keyword")
        );
    }
}
