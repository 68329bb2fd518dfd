use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prospect-pricing",
    version,
    about = "Prospect pricing and campaign launch service"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config.toml",
        global = true,
        env = "PROSPECT_PRICING_CONFIG"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the pricing service (default)
    Serve,

    /// Price a daily prospect count against the configured plan table
    Quote {
        /// Requested prospects per day
        count: String,

        /// Balance to check affordability against
        #[arg(short, long, default_value = "0")]
        balance: Decimal,

        /// Price as an admin account (unlimited balance)
        #[arg(long, conflicts_with = "balance")]
        admin: bool,

        /// Label language (en or es)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// List the configured plans
    Plans {
        /// Label language (en or es)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with tokens masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
