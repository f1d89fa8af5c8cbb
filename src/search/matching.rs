//! Ranking checks against a target URL or domain
//!
//! Results are always scanned in API order, so the lowest rank wins a tie.

use std::fmt;

use serde::Serialize;
use url::Url;

use super::SearchResult;

/// Which checks to run against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Rank of the exact URL
    Exact,
    /// First result whose host equals the target domain
    Domain,
    /// First result whose host contains the target text
    Contains,
    /// Exact URL, then same domain
    #[default]
    Both,
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Verdict {
    ExactUrl {
        url: String,
        rank: Option<usize>,
        scanned: usize,
    },
    Domain {
        domain: String,
        substring: bool,
        found: Option<SearchResult>,
        scanned: usize,
    },
}

impl Verdict {
    /// Whether the check found the target
    pub fn is_hit(&self) -> bool {
        match self {
            Verdict::ExactUrl { rank, .. } => rank.is_some(),
            Verdict::Domain { found, .. } => found.is_some(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::ExactUrl {
                rank: Some(rank), ..
            } => write!(f, "Your URL is ranked #{} in the results.", rank),
            Verdict::ExactUrl {
                rank: None,
                scanned,
                ..
            } => write!(f, "Your URL is not in the top {} results.", scanned),
            Verdict::Domain {
                domain,
                substring,
                found: Some(hit),
                ..
            } => {
                if *substring {
                    write!(
                        f,
                        "A URL whose domain contains '{}' is ranked #{}: {}",
                        domain, hit.rank, hit.url
                    )
                } else {
                    write!(
                        f,
                        "A URL from the same domain ({}) is ranked #{}: {}",
                        domain, hit.rank, hit.url
                    )
                }
            }
            Verdict::Domain {
                domain,
                substring,
                found: None,
                scanned,
            } => {
                if *substring {
                    write!(
                        f,
                        "No URL whose domain contains '{}' was found in the top {} results.",
                        domain, scanned
                    )
                } else {
                    write!(
                        f,
                        "No URL from the domain ({}) was found in the top {} results.",
                        domain, scanned
                    )
                }
            }
        }
    }
}

/// 1-based rank of the first result whose URL is exactly `target`
pub fn exact_rank(results: &[SearchResult], target: &str) -> Option<usize> {
    results.iter().find(|r| r.url == target).map(|r| r.rank)
}

/// Lower-cased host of a URL, if it has one
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_ascii_lowercase())
}

/// Domain to look for given what the user typed.
///
/// A full URL contributes its host; a bare `example.com` or
/// `example.com/page` is read as if it had a scheme.
pub fn target_domain(target: &str) -> String {
    let target = target.trim();
    host_of(target)
        .or_else(|| host_of(&format!("http://{}", target)))
        .unwrap_or_else(|| target.to_ascii_lowercase())
}

/// First result whose host equals `domain`, or contains it when `substring`
pub fn find_domain<'a>(
    results: &'a [SearchResult],
    domain: &str,
    substring: bool,
) -> Option<&'a SearchResult> {
    if domain.is_empty() {
        return None;
    }
    let domain = domain.to_ascii_lowercase();

    results.iter().find(|r| match host_of(&r.url) {
        Some(host) if substring => host.contains(&domain),
        Some(host) => host == domain,
        None => false,
    })
}

/// Run the checks `mode` asks for over the full result list
pub fn evaluate(results: &[SearchResult], target: &str, mode: MatchMode) -> Vec<Verdict> {
    let target = target.trim();
    let scanned = results.len();

    let exact = || Verdict::ExactUrl {
        url: target.to_string(),
        rank: exact_rank(results, target),
        scanned,
    };
    let domain = |domain: String, substring: bool| Verdict::Domain {
        found: find_domain(results, &domain, substring).cloned(),
        domain,
        substring,
        scanned,
    };

    match mode {
        MatchMode::Exact => vec![exact()],
        MatchMode::Domain => vec![domain(target_domain(target), false)],
        MatchMode::Contains => vec![domain(target_domain(target), true)],
        MatchMode::Both => vec![exact(), domain(target_domain(target), false)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(urls: &[&str]) -> Vec<SearchResult> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| SearchResult {
                rank: i + 1,
                url: url.to_string(),
                title: format!("Result {}", i + 1),
            })
            .collect()
    }

    #[test]
    fn test_exact_rank_found() {
        let list = results(&["https://a.com/", "https://b.com/", "https://c.com/"]);
        assert_eq!(exact_rank(&list, "https://b.com/"), Some(2));
    }

    #[test]
    fn test_exact_rank_not_found() {
        let list = results(&["https://a.com/", "https://b.com/", "https://c.com/"]);
        assert_eq!(exact_rank(&list, "https://d.com/"), None);
        // Exact means exact: no trailing-slash or scheme normalisation
        assert_eq!(exact_rank(&list, "https://b.com"), None);
        assert_eq!(exact_rank(&list, "http://b.com/"), None);
    }

    #[test]
    fn test_exact_rank_first_occurrence_wins() {
        let list = results(&["https://a.com/", "https://b.com/", "https://b.com/"]);
        assert_eq!(exact_rank(&list, "https://b.com/"), Some(2));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://WWW.Example.com:8443/path?q=1").as_deref(),
            Some("www.example.com")
        );
        assert_eq!(host_of("not a url"), None);
    }

    #[test]
    fn test_target_domain() {
        assert_eq!(target_domain("https://y.com/some/page"), "y.com");
        assert_eq!(target_domain("y.com"), "y.com");
        assert_eq!(target_domain("Y.com/page"), "y.com");
        assert_eq!(target_domain("  www.y.com "), "www.y.com");
    }

    #[test]
    fn test_find_domain_exact_host() {
        let list = results(&["https://x.com/a", "https://y.com/b", "https://z.com/c"]);

        let hit = find_domain(&list, "y.com", false).unwrap();
        assert_eq!(hit.rank, 2);
        assert_eq!(hit.url, "https://y.com/b");

        assert!(find_domain(&list, "w.com", false).is_none());
        // Subdomains are different hosts
        assert!(find_domain(&list, "com", false).is_none());
    }

    #[test]
    fn test_find_domain_substring() {
        let list = results(&["https://x.com/a", "https://y.com/b", "https://z.com/c"]);

        let hit = find_domain(&list, "y", true).unwrap();
        assert_eq!(hit.rank, 2);
    }

    #[test]
    fn test_find_domain_lowest_rank_wins() {
        let list = results(&[
            "https://x.com/",
            "https://shop.y.com/",
            "https://y.com/first",
            "https://y.com/second",
        ]);

        assert_eq!(find_domain(&list, "y.com", false).unwrap().rank, 3);
        assert_eq!(find_domain(&list, "y.com", true).unwrap().rank, 2);
    }

    #[test]
    fn test_find_domain_skips_unparseable_urls() {
        let list = results(&["garbage", "https://y.com/"]);
        assert_eq!(find_domain(&list, "y.com", false).unwrap().rank, 2);
        assert!(find_domain(&list, "", true).is_none());
    }

    #[test]
    fn test_evaluate_both_modes() {
        let list = results(&["https://x.com/", "https://y.com/other", "https://y.com/mine"]);

        let verdicts = evaluate(&list, "https://y.com/mine", MatchMode::Both);

        assert_eq!(verdicts.len(), 2);
        assert_eq!(
            verdicts[0],
            Verdict::ExactUrl {
                url: "https://y.com/mine".to_string(),
                rank: Some(3),
                scanned: 3,
            }
        );
        match &verdicts[1] {
            Verdict::Domain { domain, found, .. } => {
                assert_eq!(domain, "y.com");
                assert_eq!(found.as_ref().unwrap().rank, 2);
            }
            other => panic!("Expected domain verdict, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_single_modes() {
        let list = results(&["https://x.com/", "https://y.com/", "https://z.com/"]);

        assert_eq!(evaluate(&list, "https://q.com/", MatchMode::Exact).len(), 1);
        assert!(!evaluate(&list, "https://q.com/", MatchMode::Exact)[0].is_hit());
        assert!(evaluate(&list, "y.com", MatchMode::Domain)[0].is_hit());
        assert!(evaluate(&list, "y", MatchMode::Contains)[0].is_hit());
        assert!(!evaluate(&list, "q", MatchMode::Contains)[0].is_hit());
        assert!(evaluate(&list, "https://z.com/page", MatchMode::Contains)[0].is_hit());
    }

    #[test]
    fn test_verdict_messages() {
        let list = results(&["https://x.com/", "https://y.com/"]);

        let hit = &evaluate(&list, "https://y.com/", MatchMode::Exact)[0];
        assert_eq!(hit.to_string(), "Your URL is ranked #2 in the results.");

        let miss = &evaluate(&list, "https://q.com/", MatchMode::Exact)[0];
        assert_eq!(miss.to_string(), "Your URL is not in the top 2 results.");

        let domain_miss = &evaluate(&list, "q.com", MatchMode::Domain)[0];
        assert!(domain_miss.to_string().contains("(q.com)"));
        assert!(domain_miss.to_string().contains("top 2"));

        let contains_hit = &evaluate(&list, "y", MatchMode::Contains)[0];
        assert!(contains_hit.to_string().contains("contains 'y'"));
        assert!(contains_hit.to_string().contains("#2"));
    }
}
