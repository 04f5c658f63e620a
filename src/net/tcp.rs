//! TCP reachability checks.
//!
//! A bare host is only worth an HTTP probe if at least one candidate port
//! completes a TCP handshake. The connection is dropped as soon as it is
//! established.

use super::traits::Reachability;
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Reachability checker backed by real TCP connects.
#[derive(Debug, Clone)]
pub struct TcpReachability {
    timeout: Duration,
}

impl TcpReachability {
    /// Create a checker with the given per-connect timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Reachability for TcpReachability {
    async fn is_reachable(&self, host: &str, port: Port) -> bool {
        match timeout(self.timeout, TcpStream::connect((host, port.as_u16()))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                debug!(host, port = port.as_u16(), error = %e, "connect failed");
                false
            }
            Err(_) => {
                debug!(host, port = port.as_u16(), "connect timed out");
                false
            }
        }
    }
}

/// A host that accepted a connection on at least one candidate port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidHost {
    pub host: String,
    /// First candidate port that answered.
    pub port: Port,
}

impl fmt::Display for ValidHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)
    }
}

/// Validate `host` against `ports` in order.
///
/// Stops at the first port that accepts a connection, so a host reachable on
/// several ports is still reported once. Returns `None` when no port answers.
pub async fn validate_host<R>(reachability: &R, host: &str, ports: &[Port]) -> Option<ValidHost>
where
    R: Reachability + ?Sized,
{
    for &port in ports {
        if reachability.is_reachable(host, port).await {
            info!("valid host {} with port {}", host, port);
            return Some(ValidHost {
                host: host.to_string(),
                port,
            });
        }
        warn!("invalid host {} with port {}", host, port);
    }

    None
}
