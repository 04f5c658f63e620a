//! Configuration management for httpsweep.
//!
//! `ProbeConfig` is the immutable per-run configuration handed to the
//! pipeline; `AppSettings` holds persisted defaults in the XDG config
//! directory.

mod probe;
mod settings;

pub use probe::{ProbeConfig, REACHABILITY_TIMEOUT, TLS_HANDSHAKE_TIMEOUT};
pub use settings::{AppSettings, Paths};
