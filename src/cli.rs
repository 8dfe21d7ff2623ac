use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sftpgw",
    version,
    about = "HTTP gateway serving files from registered SFTP hosts"
)]
pub struct Cli {
    /// Path to configuration file (also settable via SFTPGW_CONFIG env var)
    #[arg(short, long, default_value = "config.toml", env = "SFTPGW_CONFIG")]
    pub config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate configuration file
    CheckConfig,
    /// Generate a commented sample config file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
