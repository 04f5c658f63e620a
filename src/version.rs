//! Release version check.
//!
//! Compares the running version against the `tag_name` of the latest
//! release. Any failure yields [`VersionStatus::Unknown`]; the check never
//! fails the run.

use crate::net::HttpClient;
use serde::Deserialize;
use tracing::debug;

/// Running version as a release tag.
pub const CURRENT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Outcome of the version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    Latest,
    /// A newer release exists; holds its tag.
    Outdated(String),
    Unknown,
    /// No release endpoint configured.
    Unchecked,
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

fn numeric_parts(tag: &str) -> Option<Vec<u64>> {
    tag.trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| part.parse().ok())
        .collect()
}

/// Compare the running tag against the latest published tag.
pub fn compare(current: &str, latest: &str) -> VersionStatus {
    match (numeric_parts(current), numeric_parts(latest)) {
        (Some(current), Some(latest)) if current < latest => {
            VersionStatus::Outdated(format!("v{}", join(&latest)))
        }
        (Some(current), Some(latest)) if current == latest => VersionStatus::Latest,
        _ => VersionStatus::Unknown,
    }
}

fn join(parts: &[u64]) -> String {
    parts.iter().map(u64::to_string).collect::<Vec<_>>().join(".")
}

/// Fetch the latest release from `url` and compare it with [`CURRENT_VERSION`].
pub async fn check(client: &HttpClient, url: &str) -> VersionStatus {
    let body = match client.get_bytes(url).await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "version check failed");
            return VersionStatus::Unknown;
        }
    };

    match serde_json::from_slice::<Release>(&body) {
        Ok(release) => compare(CURRENT_VERSION, &release.tag_name),
        Err(e) => {
            debug!(error = %e, "unexpected release payload");
            VersionStatus::Unknown
        }
    }
}
