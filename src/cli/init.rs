//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the ValueSERP API key and cache lifetime, then writes them to
/// the config file. Other settings already in the file are kept; a file that
/// cannot be parsed is reported and left untouched.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;

    println!("{}", "Welcome to serprank!".bold().green());
    println!("Let's set up your ValueSERP configuration.\n");

    let theme = ColorfulTheme::default();

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your ValueSERP API key")
        .interact()?;

    let cache_ttl_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Cache results for how many seconds?")
        .default(config.cache_ttl_secs)
        .interact_text()?;

    let config = apply_answers(config, &api_key, cache_ttl_secs, opts.api_host_ref())?;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!(
        "  {} - Check a ranking",
        "serprank search -c \"plombier\" \"Paris,France\" --target https://example.com/".cyan()
    );
    println!("  {} - Show configuration status", "serprank status".cyan());

    Ok(())
}

/// Merge the prompted values into the loaded config
fn apply_answers(
    mut config: Config,
    api_key: &str,
    cache_ttl_secs: u64,
    api_host: Option<&str>,
) -> Result<Config> {
    config.api_key = Some(api_key.trim().to_string());
    config.cache_ttl_secs = cache_ttl_secs;
    if let Some(host) = api_host {
        config.api_host = Some(host.to_string());
    }
    config.validate()?;
    Ok(config)
}
