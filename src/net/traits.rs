//! Transport trait abstractions.
//!
//! The probers and the pipeline only talk to the network through these two
//! traits, so tests can swap in deterministic in-memory transports.

use crate::error::FetchResult;
use crate::types::Port;
use async_trait::async_trait;
use reqwest::StatusCode;

/// A fully-read HTTP response, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The URL as requested (not re-serialized by the client).
    pub url: String,
    pub status: StatusCode,
    /// Raw `Location` header, if present and valid UTF-8.
    pub location: Option<String>,
    /// Number of body bytes read and discarded.
    pub body_size: u64,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: StatusCode, body_size: u64) -> Self {
        Self {
            url: url.into(),
            status,
            location: None,
            body_size,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Performs a single GET without following redirects.
///
/// Implementations must be safe to share across all probe workers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and drain its body.
    async fn get(&self, url: &str) -> FetchResult<HttpResponse>;
}

/// TCP-level liveness check.
#[async_trait]
pub trait Reachability: Send + Sync {
    /// Whether `host:port` accepts a TCP connection.
    async fn is_reachable(&self, host: &str, port: Port) -> bool;
}
