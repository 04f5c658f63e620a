//! Immutable probe configuration shared by every worker.

use crate::types::{Port, PortSpec};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Timeout for a single TCP reachability check.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(3);

/// Upper bound on connection setup, including the TLS handshake.
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for a probing run.
///
/// Created once at startup and shared read-only (behind an `Arc`) across
/// all pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Workers per pipeline stage.
    pub threads: NonZeroUsize,
    /// Overall timeout for one HTTP request, body included.
    pub request_timeout: Duration,
    /// Ports tried, in order, when validating a bare host.
    pub candidate_ports: Vec<Port>,
    /// Timeout for each reachability check.
    pub reachability_timeout: Duration,
    /// Emit diagnostic lines on stderr.
    pub verbose: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            threads: NonZeroUsize::new(40).unwrap_or(NonZeroUsize::MIN),
            request_timeout: Duration::from_secs(10),
            candidate_ports: PortSpec::default().into_ports(),
            reachability_timeout: REACHABILITY_TIMEOUT,
            verbose: false,
        }
    }
}

impl ProbeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count per stage. Zero is clamped to one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = NonZeroUsize::new(threads).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the candidate ports.
    pub fn with_ports(mut self, ports: PortSpec) -> Self {
        self.candidate_ports = ports.into_ports();
        self
    }

    /// Set the reachability check timeout.
    pub fn with_reachability_timeout(mut self, timeout: Duration) -> Self {
        self.reachability_timeout = timeout;
        self
    }

    /// Enable verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Worker count as a plain `usize`.
    pub fn workers(&self) -> usize {
        self.threads.get()
    }
}
