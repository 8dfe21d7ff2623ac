use std::collections::HashMap;

use crate::config::types::HostConfig;

/// Static ip → host lookup built once at startup from the config file.
///
/// Owned by the HTTP state and injected into handlers; never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct HostRegistry {
    hosts: HashMap<String, HostConfig>,
}

impl HostRegistry {
    pub fn new(hosts: &[HostConfig]) -> Self {
        Self {
            hosts: hosts
                .iter()
                .map(|h| (h.ip.clone(), h.clone()))
                .collect(),
        }
    }

    pub fn get(&self, ip: &str) -> Option<&HostConfig> {
        self.hosts.get(ip)
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.hosts.contains_key(ip)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
