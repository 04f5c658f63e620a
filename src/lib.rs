//! # httpsweep - An HTTP/HTTPS-aware domain prober
//!
//! httpsweep takes a list of hostnames and URLs, finds out which hosts
//! accept TCP connections and probes them over HTTP, falling back to HTTPS
//! once when plain HTTP fails. Every attempt ends up in a JSON report.
//!
//! ## Features
//!
//! - **Target Classification**: full `http`/`https` URLs are fetched as-is, anything else is a host
//! - **Reachability Gate**: hosts are only probed once a candidate port accepts a connection
//! - **Protocol Fallback**: HTTP first, a single HTTPS attempt only when HTTP fails
//! - **Concurrent Pipeline**: bounded worker pools connected by channels
//! - **Live Output**: one colored line per classified response
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use httpsweep::config::ProbeConfig;
//! use httpsweep::net::{HttpClient, TcpReachability};
//! use httpsweep::pipeline::Pipeline;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ProbeConfig::new().with_threads(20);
//!     let fetcher = Arc::new(HttpClient::new(config.request_timeout).unwrap());
//!     let reachability = Arc::new(TcpReachability::new(config.reachability_timeout));
//!     let pipeline = Pipeline::new(config, fetcher, reachability);
//!
//!     let mut results = pipeline.spawn(vec!["example.com".into(), "https://example.org/login".into()]);
//!     while let Some(record) = results.recv().await {
//!         println!("{} {:?}", record.url, record.status);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports, targets and outcome records
//! - [`net`] - TCP reachability and the HTTP client, behind the `Reachability` and `Fetcher` traits
//! - [`probe`] - Host/URL probers and response classification
//! - [`pipeline`] - The concurrent coordinator
//! - [`config`] - Probe configuration and persisted settings
//! - [`storage`] - JSON report sink
//! - [`error`] - Error types
//! - [`output`] - Terminal output

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod net;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod storage;
pub mod types;
pub mod version;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::ProbeConfig;
pub use error::{FetchError, InputError};
pub use net::{Fetcher, HttpClient, Reachability, TcpReachability};
pub use pipeline::Pipeline;
pub use types::{OutcomeRecord, Port, PortSpec, Proto, Target};
