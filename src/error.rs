//! Error types for httpsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-target failures
//! (`FetchError`) never propagate past the prober that produced them; the
//! remaining types cover the startup path and the report sink.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP probe attempt.
///
/// The transport layer does not distinguish DNS, connect, TLS or timeout
/// failures; the cause text carries that detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("{reason}")]
    Body { status: StatusCode, reason: String },
}

impl FetchError {
    /// Status line already received before the failure, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(_) => None,
            Self::Body { status, .. } => Some(*status),
        }
    }
}

/// Errors raised while collecting targets.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to open file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read lines: {0}")]
    Read(#[from] std::io::Error),

    #[error("no targets provided")]
    Empty,
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid port specification: {0}")]
    InvalidPorts(#[from] crate::types::PortError),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors raised by the JSON report sink.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for probe attempts.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for target input.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for report persistence.
pub type ReportResult<T> = Result<T, ReportError>;
