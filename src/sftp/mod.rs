pub mod cache;
pub mod client;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::types::HostConfig;

/// Errors surfaced by session establishment and remote file operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    #[error("connecting to {addr} timed out after {timeout_secs}s")]
    ConnectTimeout { addr: String, timeout_secs: u64 },

    #[error("authentication rejected for {username}@{addr}")]
    AuthRejected { username: String, addr: String },

    #[error("sftp {op} failed for {path}: {reason}")]
    Io {
        op: &'static str,
        path: String,
        reason: String,
    },
}

/// One live authenticated session to a single host.
///
/// `file_exists` reports `Ok(false)` only for an explicit remote not-found
/// status; any other failure is an error, so callers can tell "the file is
/// absent" apart from "the probe itself failed".
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Probe the remote path's metadata.
    async fn file_exists(&self, path: &str) -> Result<bool, SessionError>;

    /// Open and fully read the remote file, decoding as UTF-8 text.
    async fn read_file(&self, path: &str) -> Result<String, SessionError>;

    /// Reverse-DNS name for the host ip, recomputed per call.
    /// Falls back to the ip string when no PTR record resolves.
    async fn hostname(&self) -> String;

    /// Whether the underlying transport is still usable.
    async fn is_active(&self) -> bool;

    /// Release the transport. Terminal; errors are ignored.
    async fn close(&self);
}

impl std::fmt::Debug for dyn RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn RemoteSession")
    }
}

/// Establishes sessions. The seam between the cache and the protocol
/// implementation; tests substitute an in-memory connector here.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, host: &HostConfig) -> Result<Arc<dyn RemoteSession>, SessionError>;
}
