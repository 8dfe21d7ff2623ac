use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::types::AppConfig;
use crate::registry::HostRegistry;
use crate::sftp::cache::SessionCache;
use crate::sftp::client::SftpConnector;

/// Run the gateway until SIGINT/SIGTERM, then close cached sessions.
pub async fn run(config: AppConfig) -> Result<()> {
    let registry = Arc::new(HostRegistry::new(&config.hosts));
    if registry.is_empty() {
        warn!("No hosts registered; every request will be rejected");
    }

    let connector = Arc::new(SftpConnector::new(config.sftp.clone()));
    let cache = Arc::new(SessionCache::new(connector));
    let state = AppState {
        registry,
        cache: cache.clone(),
    };

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    api::start_server(&config.server.listen, state, shutdown).await?;

    info!("Closing cached sessions");
    cache.close_all().await;
    info!("Shutdown complete");
    Ok(())
}

fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut sigterm = match tokio::signal::unix::signal(
                tokio::signal::unix::SignalKind::terminate(),
            ) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "Could not install SIGTERM handler");
                    let _ = ctrl_c.await;
                    info!("Received Ctrl-C, shutting down");
                    shutdown.cancel();
                    return;
                }
            };
            tokio::select! {
                _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
                _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
            }
        }
        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("Received Ctrl-C, shutting down");
        }
        shutdown.cancel();
    });
}
