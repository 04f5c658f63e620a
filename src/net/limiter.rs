//! Per-host connection limit.
//!
//! Each `host:port` gets its own semaphore; a request holds a permit from
//! send until its body is drained.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Concurrent connections allowed to one host.
pub const MAX_CONNS_PER_HOST: usize = 250;

/// `host:port` key for `url`, with the scheme's default port filled in.
fn host_key(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}:{}", host, port))
}

/// Caps in-flight requests per host.
#[derive(Debug)]
pub struct HostLimiter {
    limit: usize,
    hosts: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl HostLimiter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            hosts: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Wait for a slot on `url`'s host.
    ///
    /// Returns `None` for URLs without a host; those fail in the client anyway.
    pub async fn acquire(&self, url: &str) -> Option<OwnedSemaphorePermit> {
        let key = host_key(url)?;
        let semaphore = {
            let mut hosts = self.hosts.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                hosts
                    .entry(key)
                    .or_insert_with(|| Arc::new(Semaphore::new(self.limit))),
            )
        };
        semaphore.acquire_owned().await.ok()
    }
}

impl Default for HostLimiter {
    fn default() -> Self {
        Self::new(MAX_CONNS_PER_HOST)
    }
}
