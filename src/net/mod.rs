//! Network transports.
//!
//! - [`tcp`]: TCP reachability checks used to validate bare hosts
//! - [`client`]: the shared HTTP client used by every probe
//! - [`limiter`]: per-host cap on concurrent requests

pub mod client;
pub mod limiter;
pub mod tcp;
pub mod traits;

pub use client::{random_user_agent, HttpClient};
pub use limiter::{HostLimiter, MAX_CONNS_PER_HOST};
pub use tcp::{validate_host, TcpReachability, ValidHost};
pub use traits::{Fetcher, HttpResponse, Reachability};
