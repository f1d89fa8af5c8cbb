//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::format_json;

#[derive(Serialize)]
struct StatusView {
    config_path: String,
    config_exists: bool,
    api_host: String,
    api_key_configured: bool,
    cache_ttl_secs: u64,
    cache_enabled: bool,
    cache_dir: String,
}

/// Run the status command to display resolved configuration
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts, None)?;

    let view = StatusView {
        config_path: ctx.config_path.display().to_string(),
        config_exists: ctx.config_path.exists(),
        api_host: ctx.config.api_host().to_string(),
        api_key_configured: ctx.config.api_key.is_some(),
        cache_ttl_secs: ctx.config.cache_ttl_secs,
        cache_enabled: !opts.no_cache,
        cache_dir: ctx.service.storage().dir().display().to_string(),
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&view)?);
        return Ok(());
    }

    println!("{}\n", "serprank Configuration Status".bold());

    if view.config_exists {
        println!("Config file: {}", view.config_path.cyan());
    } else {
        println!(
            "Config file: {} {}",
            view.config_path.cyan(),
            "(not created yet)".dimmed()
        );
    }
    println!("API host:    {}", view.api_host);
    println!();

    match ctx.config.api_key.as_deref() {
        Some(key) => println!("{} API key configured ({})", "✓".green(), mask_key(key)),
        None => {
            println!("{} API key not configured", "✗".red());
            println!("  → Run 'serprank init' or set SERPRANK_API_KEY");
        }
    }

    if view.cache_enabled {
        println!(
            "{} Cache at {} (results kept {}s)",
            "✓".green(),
            view.cache_dir,
            view.cache_ttl_secs
        );
    } else {
        println!("{} Cache disabled for this run", "⚠".yellow());
    }

    Ok(())
}

/// Show only the last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
