//! Target classification.
//!
//! Every user-supplied target is classified exactly once:
//! - `http://…` / `https://…` strings that parse as URLs become [`UrlTarget`]s
//! - everything else (bare hostnames, `host:port`, garbage) becomes a [`HostTarget`]
//!
//! Classification never fails; a malformed URL simply becomes a host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Protocol of a probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Proto {
    Http,
    Https,
}

impl Proto {
    /// Lowercase URL scheme.
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Build `<scheme>://<host>`.
    pub fn url_for(self, host: &str) -> String {
        format!("{}://{}", self.scheme(), host)
    }
}

impl fmt::Display for Proto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "HTTP"),
            Self::Https => write!(f, "HTTPS"),
        }
    }
}

impl FromStr for Proto {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(TargetError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Error type for URL target parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// A fully-qualified `http`/`https` URL target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlTarget {
    pub scheme: Proto,
    /// Host as written in the URL, including a non-default port.
    pub host: String,
    /// The original input, requested verbatim.
    pub raw: String,
}

impl UrlTarget {
    /// Parse a URL with an `http` or `https` scheme.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw).map_err(|e| TargetError::InvalidUrl(raw.to_string(), e.to_string()))?;
        let scheme: Proto = url.scheme().parse()?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(TargetError::MissingHost(raw.to_string())),
        };

        Ok(Self {
            scheme,
            host,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for UrlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A bare host to be validated and probed over HTTP, then HTTPS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTarget {
    pub host: String,
}

impl HostTarget {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)
    }
}

/// A classified target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Url(UrlTarget),
    Host(HostTarget),
}

impl Target {
    /// Classify a trimmed, non-empty target string.
    pub fn classify(raw: &str) -> Self {
        match UrlTarget::parse(raw) {
            Ok(url) => Self::Url(url),
            Err(_) => Self::Host(HostTarget::new(raw)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => url.fmt(f),
            Self::Host(host) => host.fmt(f),
        }
    }
}
