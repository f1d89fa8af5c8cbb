//! Rendering of batch search reports

use colored::Colorize;

use super::Formattable;
use super::json::format_json;
use super::table::{NO_RESULTS, format_table};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{ResultDisplay, ResultRowDisplay, VerdictDisplay};
use crate::search::{BatchReport, OutcomeStatus, Verdict};

impl Formattable for BatchReport {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_pretty(self)),
            OutputFormat::Table => Ok(format_flat(self)),
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}

fn verdict_line(verdict: &Verdict) -> String {
    if verdict.is_hit() {
        format!("{} {}", "✓".green(), verdict)
    } else {
        format!("{} {}", "✗".yellow(), verdict)
    }
}

/// One section per combination: heading, results table, verdicts
fn format_pretty(report: &BatchReport) -> String {
    let mut sections = Vec::new();

    for outcome in &report.outcomes {
        let mut lines = Vec::new();
        let heading = format!("Results for: {}", outcome.combination).bold();

        match &outcome.status {
            OutcomeStatus::Found {
                results,
                from_cache,
                verdicts,
                ..
            } => {
                if *from_cache {
                    lines.push(format!("{} {}", heading, "(cached)".dimmed()));
                } else {
                    lines.push(heading.to_string());
                }

                let rows: Vec<ResultDisplay> = results.iter().map(ResultDisplay::from).collect();
                lines.push(format_table(&rows, NO_RESULTS));
                lines.extend(verdicts.iter().map(verdict_line));
            }
            OutcomeStatus::Failed { error } => {
                lines.push(heading.to_string());
                lines.push(format!("{} Search failed: {}", "✗".red(), error));
            }
        }

        sections.push(lines.join("\n"));
    }

    if report.skipped > 0 {
        sections.push(
            format!(
                "Skipped {} combination(s) missing a keyword or location.",
                report.skipped
            )
            .dimmed()
            .to_string(),
        );
    }

    sections.join("\n\n")
}

/// One results table across all combinations, then one verdict table
fn format_flat(report: &BatchReport) -> String {
    let mut rows = Vec::new();
    let mut checks = Vec::new();
    let mut failures = Vec::new();

    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Found {
                results, verdicts, ..
            } => {
                rows.extend(
                    results
                        .iter()
                        .map(|r| ResultRowDisplay::new(&outcome.combination, r)),
                );
                checks.extend(
                    verdicts
                        .iter()
                        .map(|v| VerdictDisplay::new(&outcome.combination, v)),
                );
            }
            OutcomeStatus::Failed { error } => {
                failures.push(format!("Search failed for {}: {}", outcome.combination, error));
            }
        }
    }

    let mut sections = vec![format_table(&rows, NO_RESULTS)];
    if !checks.is_empty() {
        sections.push(format_table(&checks, ""));
    }
    if !failures.is_empty() {
        sections.push(failures.join("\n"));
    }
    sections.join("\n\n")
}
