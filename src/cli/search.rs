//! Search command implementation

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, SearchArgs};
use crate::error::{InputError, Result};
use crate::output;
use crate::search::{BatchReport, Combination, Command, CommandOutcome, SearchBatch};

/// Run a search batch and print the report
pub async fn run(opts: &GlobalOptions, args: &SearchArgs) -> Result<()> {
    let combinations = collect_combinations(args.input.as_deref(), &args.combos)?;
    let ctx = CommandContext::new(opts, args.cache_ttl)?;

    let batch = SearchBatch::new(combinations, ctx.api_key(args.api_key.as_deref()))
        .with_target(args.target.clone(), args.match_mode)
        .with_top(args.top);

    let progress = progress_bar(ctx.format);
    let outcome = ctx
        .service
        .execute(Command::SearchBatch(batch), |index, total, combination| {
            progress.set_message(format!(
                "[{}/{}] Searching {}",
                index + 1,
                total,
                combination
            ));
        })
        .await?;
    progress.finish_and_clear();

    if let CommandOutcome::Search(report) = outcome {
        present(&report, ctx.format)?;
    }
    Ok(())
}

/// Combinations from the input file (first) and then `--combo` pairs, in order
pub fn collect_combinations(input: Option<&Path>, combos: &[String]) -> Result<Vec<Combination>> {
    let mut combinations = match input {
        Some(path) => read_input_file(path)?,
        None => Vec::new(),
    };

    combinations.extend(
        combos
            .chunks_exact(2)
            .map(|pair| Combination::new(pair[0].as_str(), pair[1].as_str())),
    );
    Ok(combinations)
}

fn read_input_file(path: &Path) -> Result<Vec<Combination>> {
    let input_error = |reason: String| InputError::InputFile {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?;
    let entries: Vec<Combination> =
        serde_yaml::from_str(&contents).map_err(|e| input_error(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|c| Combination::new(c.keyword, c.location))
        .collect())
}

fn progress_bar(format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

fn present(report: &BatchReport, format: OutputFormat) -> Result<()> {
    // JSON carries input errors inside the document
    if format != OutputFormat::Json {
        for error in &report.input_errors {
            eprintln!("{} {}", "Error:".red().bold(), error);
        }
        if report.outcomes.is_empty() {
            return Ok(());
        }
    }

    output::print(report, format)?;

    let failures = report.failures();
    if failures > 0 && format != OutputFormat::Json {
        eprintln!(
            "{} {} of {} searches failed",
            "⚠".yellow(),
            failures,
            report.outcomes.len()
        );
    }
    Ok(())
}
