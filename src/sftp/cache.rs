use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::types::HostConfig;
use crate::sftp::{Connector, RemoteSession, SessionError};

type Slot = Arc<Mutex<Option<Arc<dyn RemoteSession>>>>;

/// Lazy per-ip cache of live sessions.
///
/// Invariant: at most one session per ip. A session found inactive is closed
/// and replaced before anything is returned. The check → close → reconnect
/// sequence for one ip runs under that ip's slot mutex, so two concurrent
/// requests for the same host cannot each establish a session and leak one.
pub struct SessionCache {
    connector: Arc<dyn Connector>,
    slots: DashMap<String, Slot>,
}

impl SessionCache {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            slots: DashMap::new(),
        }
    }

    /// Return a session for `host` that is active at the moment of return.
    ///
    /// Reuses the cached session while its transport is up; otherwise closes
    /// the stale one and establishes a replacement. Sessions live until the
    /// process ends or their transport drops; there is no other eviction.
    pub async fn acquire(&self, host: &HostConfig) -> Result<Arc<dyn RemoteSession>, SessionError> {
        let slot = self.slots.entry(host.ip.clone()).or_default().clone();
        let mut guard = slot.lock().await;

        if let Some(session) = guard.as_ref() {
            if session.is_active().await {
                debug!(ip = %host.ip, "Reusing cached session");
                return Ok(session.clone());
            }
            info!(ip = %host.ip, "Cached session is no longer active, reconnecting");
            session.close().await;
            *guard = None;
        }

        let session = self.connector.connect(host).await?;
        info!(ip = %host.ip, port = host.port, "Established session");
        *guard = Some(session.clone());
        Ok(session)
    }

    // Snapshot the slots first so no map shard stays locked across an await.
    fn snapshot(&self) -> Vec<Slot> {
        self.slots.iter().map(|e| e.value().clone()).collect()
    }

    /// Number of ips currently holding a cached session.
    pub async fn len(&self) -> usize {
        let mut n = 0;
        for slot in self.snapshot() {
            if slot.lock().await.is_some() {
                n += 1;
            }
        }
        n
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Close every cached session. Used on shutdown.
    pub async fn close_all(&self) {
        for slot in self.snapshot() {
            let mut guard = slot.lock().await;
            if let Some(session) = guard.take() {
                session.close().await;
            }
        }
        self.slots.clear();
    }
}
