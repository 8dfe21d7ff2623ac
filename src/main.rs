use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use sftpgw::cli::{Cli, Command};
use sftpgw::config;
use sftpgw::logging::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::CheckConfig) => {
            let cfg = config::load_config(&cli.config)?;
            println!("Configuration is valid.");
            println!("  Listen: {}", cfg.server.listen);
            println!("  Hosts:  {}", cfg.hosts.len());
            return Ok(());
        }
        Some(Command::Init { output }) => {
            if output.exists() {
                anyhow::bail!("refusing to overwrite existing file: {}", output.display());
            }
            std::fs::write(output, config::sample_config())
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote sample config to {}", output.display());
            return Ok(());
        }
        None => {}
    }

    let config = config::load_config(&cli.config)?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    setup_logging(&level, config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        hosts = config.hosts.len(),
        "Starting sftpgw"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        if let Err(e) = sftpgw::server::run(config).await {
            error!(error = %e, "Server error");
            std::process::exit(1);
        }
    });

    Ok(())
}
