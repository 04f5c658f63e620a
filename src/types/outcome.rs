//! Outcome records produced by the probing pipeline.

use super::Proto;
use serde::{Deserialize, Serialize};

/// Result of one probe attempt, as written to the report.
///
/// `is_error` discriminates the two shapes: success records carry
/// `status`/`size_body` (and `redirected_to` for 3xx), error records carry
/// `error_message` and, for body-read failures, the status already received.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub url: String,
    pub proto: Proto,
    pub host: String,
    pub status: Option<String>,
    pub size_body: Option<String>,
    #[serde(rename = "redirected_to")]
    pub redirect_location: Option<String>,
    pub is_error: bool,
    pub error_message: Option<String>,
}

impl OutcomeRecord {
    /// A classified response.
    pub fn success(
        url: impl Into<String>,
        proto: Proto,
        host: impl Into<String>,
        status: impl Into<String>,
        size_body: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            proto,
            host: host.into(),
            status: Some(status.into()),
            size_body: Some(size_body.into()),
            redirect_location: None,
            is_error: false,
            error_message: None,
        }
    }

    /// A failed attempt.
    pub fn failure(
        url: impl Into<String>,
        proto: Proto,
        host: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            proto,
            host: host.into(),
            status: None,
            size_body: None,
            redirect_location: None,
            is_error: true,
            error_message: Some(message.into()),
        }
    }

    pub fn with_redirect(mut self, location: impl Into<String>) -> Self {
        self.redirect_location = Some(location.into());
        self
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }
}
