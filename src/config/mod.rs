pub mod types;

use anyhow::{Context, Result};
use std::net::Ipv4Addr;
use std::path::Path;
use types::AppConfig;

/// Maximum config file size (1 MB)
const MAX_CONFIG_SIZE: u64 = 1_048_576;

/// Load and validate configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("reading config metadata: {}", path.display()))?;
    if metadata.len() > MAX_CONFIG_SIZE {
        anyhow::bail!(
            "config file too large: {} bytes (max {} bytes)",
            metadata.len(),
            MAX_CONFIG_SIZE
        );
    }

    // Check file permissions on Unix (warn if group/other readable)
    check_config_file_permissions(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config: {}", path.display()))?;
    parse_config(&content)
}

/// On Unix, warn if the config file is readable by group or others,
/// since it carries SFTP credentials in cleartext.
#[cfg(unix)]
fn check_config_file_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => {
            let mode = meta.permissions().mode();
            if mode & 0o077 != 0 {
                tracing::warn!(
                    path = %path.display(),
                    mode = format!("{:04o}", mode & 0o7777),
                    "Config file is readable by group/others. \
                     Consider restricting permissions to 0600 (owner read/write only) \
                     since it contains host passwords."
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Could not check config file permissions"
            );
        }
    }
}

#[cfg(not(unix))]
fn check_config_file_permissions(_path: &Path) {
    // Permission checks are only available on Unix systems
}

/// Parse configuration from a TOML string
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content).context("parsing TOML configuration")?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<()> {
    validate_server(config)?;
    validate_hosts(config)?;
    Ok(())
}

fn validate_server(config: &AppConfig) -> Result<()> {
    config
        .server
        .listen
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("invalid server.listen address: {}", config.server.listen))?;
    Ok(())
}

fn validate_hosts(config: &AppConfig) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for host in &config.hosts {
        host.ip
            .parse::<Ipv4Addr>()
            .with_context(|| format!("host ip is not a valid IPv4 address: {}", host.ip))?;
        if host.port == 0 {
            anyhow::bail!("host {}: port must be non-zero", host.ip);
        }
        if host.username.is_empty() {
            anyhow::bail!("host {}: username must not be empty", host.ip);
        }
        if !seen.insert(host.ip.clone()) {
            anyhow::bail!("duplicate host entry for ip {}", host.ip);
        }
    }
    Ok(())
}

/// Commented sample configuration written by `sftpgw init`.
pub fn sample_config() -> &'static str {
    r#"[server]
listen = "127.0.0.1:8080"

[logging]
level = "info"
format = "pretty"

[sftp]
# SSH keepalive interval in seconds (0 disables keepalive)
keepalive_secs = 30
# Upper bound on connect + handshake + auth, in seconds
connect_timeout_secs = 10

# One [[hosts]] block per registered SFTP host.
# The public Rebex demo server is included as a working example.
[[hosts]]
ip = "195.144.107.198"
port = 22
username = "demo"
password = "password"
"#
}
