use anyhow::Result;
use colored::Colorize;
use prospect_pricing::{config, init_tracing, server};
use std::path::Path;
use tracing::info;

/// Execute the serve command
///
/// Loads configuration, initializes logging from it, then runs the server
/// until SIGTERM/SIGINT.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting prospect pricing service...".green());

    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.server.log_level, &cfg.server.log_format);

    info!("Configuration loaded from {}", config_path.display());

    server::start_server(cfg, config_path.to_path_buf()).await
}
