//! Command implementations for the CLI
//!
//! - serve: Start the pricing service
//! - quote: Price a prospect count from the terminal
//! - plans: List the configured plans
//! - test: Test configuration validity
//! - config: Configuration display and validation

pub mod config;
pub mod plans;
pub mod quote;
pub mod serve;

use anyhow::Result;
use colored::Colorize;
use prospect_pricing::{config::load_config, pricing::PlanTable};
use std::path::Path;

/// Plan table from the config file, or the built-in table when there is none
fn load_plan_table(config_path: &Path) -> Result<PlanTable> {
    if !config_path.exists() {
        eprintln!(
            "{}",
            format!(
                "{} not found, using the built-in plan table",
                config_path.display()
            )
            .dimmed()
        );
        return Ok(PlanTable::observed());
    }

    let cfg = load_config(config_path)?;
    Ok(cfg.pricing.build_table()?)
}
