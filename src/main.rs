use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use prospect_pricing::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Serve => {
            // Serve initializes tracing from the loaded config
            commands::serve::execute(&args.config).await?;
        }
        cli::Commands::Quote {
            count,
            balance,
            admin,
            locale,
        } => {
            init_tracing("warn", "text");
            commands::quote::execute(&args.config, &count, balance, admin, locale.as_deref())?;
        }
        cli::Commands::Plans { locale } => {
            init_tracing("warn", "text");
            commands::plans::execute(&args.config, locale.as_deref())?;
        }
        cli::Commands::Test => {
            init_tracing("info", "text");
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => {
            init_tracing("info", "text");
            match action {
                cli::ConfigCommands::Show => commands::config::show(&args.config)?,
                cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
            }
        }
        cli::Commands::Version => {
            println!("Prospect Pricing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
