use anyhow::Result;
use colored::Colorize;
use prospect_pricing::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with tokens masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Plans: {}", cfg.pricing.plans.len());
    println!("  Accounts: {}", cfg.accounts.len());
    println!("  Enabled Accounts: {}", count_enabled_accounts(&cfg));

    info!("Configuration validation successful");
    Ok(())
}

/// Mask session and service tokens for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();

    for account in &mut sanitized.accounts {
        account.token = mask_token(&account.token);
    }
    if let Some(token) = &mut sanitized.backend.service_token {
        *token = mask_token(token);
    }

    sanitized
}

/// Mask a token for safe display
///
/// Shows the first 4 and last 4 characters
/// Example: "tok-client-0001" -> "tok-...0001"
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

fn count_enabled_accounts(cfg: &Config) -> usize {
    cfg.accounts.iter().filter(|a| a.enabled).count()
}
