//! Cache management commands

use colored::Colorize;
use serde::Serialize;

use crate::cache::{CacheStats, ClearStats};
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::common::{format_local_datetime, format_size};
use crate::output::json::format_json;
use crate::search::{Command, CommandOutcome};

#[derive(Serialize)]
struct CacheStatusView<'a> {
    path: String,
    #[serde(flatten)]
    stats: &'a CacheStats,
    total_size_human: String,
}

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts, None)?;
    let storage = ctx.service.storage();
    let stats = storage.stats()?;
    let path = storage.dir().display().to_string();

    if ctx.format == OutputFormat::Json {
        let view = CacheStatusView {
            path,
            stats: &stats,
            total_size_human: format_size(stats.total_size_bytes),
        };
        println!("{}", format_json(&view)?);
        return Ok(());
    }

    println!("{}", "Cache Status".bold());
    println!("────────────────────────────────────────");
    println!("Location:       {}", path);
    println!("Valid entries:  {}", stats.valid_entries);
    println!("Expired:        {}", stats.expired_entries);
    if stats.unreadable_entries > 0 {
        println!("Unreadable:     {}", stats.unreadable_entries);
    }
    println!("Total size:     {}", format_size(stats.total_size_bytes));
    println!("TTL:            {}s", ctx.config.cache_ttl_secs);

    if let Some(oldest) = stats.oldest_entry {
        println!("Oldest entry:   {}", format_local_datetime(oldest));
    }
    if let Some(newest) = stats.newest_entry {
        println!("Newest entry:   {}", format_local_datetime(newest));
    }

    Ok(())
}

/// Clear all cache entries
pub async fn clear(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts, None)?;
    let outcome = ctx.service.execute(Command::ClearCache, |_, _, _| {}).await?;

    if let CommandOutcome::CacheCleared(stats) = outcome {
        print_cleared(&stats, ctx.format)?;
    }
    Ok(())
}

fn print_cleared(stats: &ClearStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(stats)?),
        _ if stats.entries_removed > 0 => {
            println!(
                "{} Cleared {} cache entries",
                "✓".green(),
                stats.entries_removed
            )
        }
        _ => println!("Cache was already empty"),
    }
    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts, None)?;
    println!("{}", ctx.service.storage().dir().display());
    Ok(())
}
