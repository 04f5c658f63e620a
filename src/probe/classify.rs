//! Response classification.
//!
//! Maps a drained HTTP response onto an [`OutcomeRecord`] by status class and
//! prints the live progress line for it. Codes outside 200-599 produce
//! neither a record nor a line.

use crate::net::HttpResponse;
use crate::output;
use crate::types::{OutcomeRecord, Proto};
use reqwest::StatusCode;
use tracing::debug;

/// Status class of a response that gets recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// Class for `status`, or `None` for informational and out-of-range codes.
    pub fn of(status: StatusCode) -> Option<Self> {
        match status.as_u16() {
            200..=299 => Some(Self::Success),
            300..=399 => Some(Self::Redirect),
            400..=499 => Some(Self::ClientError),
            500..=599 => Some(Self::ServerError),
            _ => None,
        }
    }
}

/// `"<code> <reason>"`, e.g. `"301 Moved Permanently"`.
pub fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_str(), reason),
        None => status.as_str().to_string(),
    }
}

/// Body size with its unit suffix.
pub fn size_text(bytes: u64) -> String {
    format!("{}w", bytes)
}

/// Where a redirect points, for display.
///
/// Absolute locations are used verbatim; anything else is appended to the
/// request URL.
pub fn resolve_redirect(request_url: &str, location: &str) -> String {
    if location.starts_with("http") {
        location.to_string()
    } else {
        format!("{}{}", request_url, location)
    }
}

/// Build the record for `response` without printing anything.
pub fn to_record(response: &HttpResponse, url: &str, host: &str, proto: Proto) -> Option<OutcomeRecord> {
    let class = StatusClass::of(response.status)?;
    let record = OutcomeRecord::success(
        url,
        proto,
        host,
        status_text(response.status),
        size_text(response.body_size),
    );

    Some(match class {
        StatusClass::Redirect => record.with_redirect(response.location.clone().unwrap_or_default()),
        StatusClass::Success | StatusClass::ClientError | StatusClass::ServerError => record,
    })
}

/// Classify `response`, print its live line and return its record.
///
/// `url` is the value stored in the record; the live line always shows the
/// URL that was actually requested.
pub fn classify(response: &HttpResponse, url: &str, host: &str, proto: Proto) -> Option<OutcomeRecord> {
    let Some(record) = to_record(response, url, host, proto) else {
        debug!(status = response.status.as_u16(), url = %response.url, "status outside 200-599, not recorded");
        return None;
    };

    output::print_live(response);
    Some(record)
}
