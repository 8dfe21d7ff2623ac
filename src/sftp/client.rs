use async_trait::async_trait;
use russh::client::{self, AuthResult, Handle};
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::StatusCode;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::config::types::{HostConfig, SftpConfig};
use crate::sftp::{Connector, RemoteSession, SessionError};

/// Minimal russh client handler. Host key verification is out of scope for
/// registered hosts; any presented key is accepted.
struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Production `Connector`: SSH transport via russh, SFTP subsystem via
/// russh-sftp, password authentication from the host registry entry.
pub struct SftpConnector {
    config: SftpConfig,
}

impl SftpConnector {
    pub fn new(config: SftpConfig) -> Self {
        Self { config }
    }

    async fn establish(&self, host: &HostConfig) -> Result<SftpClient, SessionError> {
        let addr = format!("{}:{}", host.ip, host.port);
        let connect_err = |e: &dyn std::fmt::Display| SessionError::Connect {
            addr: addr.clone(),
            reason: e.to_string(),
        };

        let mut ssh_config = client::Config::default();
        if self.config.keepalive_secs > 0 {
            ssh_config.keepalive_interval = Some(Duration::from_secs(self.config.keepalive_secs));
        }

        let mut handle = client::connect(
            Arc::new(ssh_config),
            (host.ip.as_str(), host.port),
            ClientHandler,
        )
        .await
        .map_err(|e| connect_err(&e))?;

        let auth = handle
            .authenticate_password(&host.username, &host.password)
            .await
            .map_err(|e| connect_err(&e))?;
        if !matches!(auth, AuthResult::Success) {
            return Err(SessionError::AuthRejected {
                username: host.username.clone(),
                addr: addr.clone(),
            });
        }

        let channel = handle
            .channel_open_session()
            .await
            .map_err(|e| connect_err(&e))?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| connect_err(&e))?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| connect_err(&e))?;

        debug!(addr = %addr, username = %host.username, "SFTP subsystem established");
        Ok(SftpClient {
            ip: host.ip.clone(),
            handle,
            sftp,
        })
    }
}

#[async_trait]
impl Connector for SftpConnector {
    async fn connect(&self, host: &HostConfig) -> Result<Arc<dyn RemoteSession>, SessionError> {
        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        let session = tokio::time::timeout(timeout, self.establish(host))
            .await
            .map_err(|_| SessionError::ConnectTimeout {
                addr: format!("{}:{}", host.ip, host.port),
                timeout_secs: self.config.connect_timeout_secs,
            })??;
        Ok(Arc::new(session))
    }
}

/// A live session: SSH handle for transport liveness and teardown, SFTP
/// subsystem for file operations.
pub struct SftpClient {
    ip: String,
    handle: Handle<ClientHandler>,
    sftp: SftpSession,
}

fn is_no_such_file(err: &russh_sftp::client::error::Error) -> bool {
    matches!(
        err,
        russh_sftp::client::error::Error::Status(status)
            if status.status_code == StatusCode::NoSuchFile
    )
}

#[async_trait]
impl RemoteSession for SftpClient {
    async fn file_exists(&self, path: &str) -> Result<bool, SessionError> {
        match self.sftp.metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if is_no_such_file(&e) => Ok(false),
            Err(e) => Err(SessionError::Io {
                op: "stat",
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn read_file(&self, path: &str) -> Result<String, SessionError> {
        let mut file = self
            .sftp
            .open(path)
            .await
            .map_err(|e| SessionError::Io {
                op: "open",
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .await
            .map_err(|e| SessionError::Io {
                op: "read",
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        String::from_utf8(buf).map_err(|_| SessionError::Io {
            op: "decode",
            path: path.to_string(),
            reason: "file content is not valid UTF-8".to_string(),
        })
    }

    async fn hostname(&self) -> String {
        let ip = self.ip.clone();
        let Ok(parsed) = ip.parse::<IpAddr>() else {
            return ip;
        };
        // getnameinfo is blocking; keep it off the runtime threads.
        match tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&parsed)).await {
            Ok(Ok(name)) => name,
            _ => ip,
        }
    }

    async fn is_active(&self) -> bool {
        !self.handle.is_closed()
    }

    async fn close(&self) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            warn!(ip = %self.ip, error = %e, "Error closing session");
        }
    }
}
