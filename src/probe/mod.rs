//! Protocol-aware probers.
//!
//! Two entry points, one per target kind:
//! - [`probe_host`]: a validated bare host, HTTP first with a single HTTPS fallback
//! - [`probe_url`]: a fully-qualified URL, fetched exactly once
//!
//! Neither retries beyond that; every failed attempt becomes an error record.

pub mod classify;

use crate::error::FetchError;
use crate::net::Fetcher;
use crate::types::{OutcomeRecord, Proto, UrlTarget};
use self::classify::status_text;
use tracing::{info, warn};

pub use self::classify::{classify, resolve_redirect, size_text, StatusClass};

/// Diagnostic text for a failed attempt against `target`.
fn error_message(target: &str, err: &FetchError) -> String {
    match err {
        FetchError::Transport(cause) => format!("fetching {} — {}", target, cause),
        FetchError::Body { reason, .. } => format!("reading response body for {} — {}", target, reason),
    }
}

fn failure_record(url: String, proto: Proto, host: &str, target: &str, err: &FetchError) -> OutcomeRecord {
    let message = error_message(target, err);
    warn!("{}", message);
    OutcomeRecord::failure(url, proto, host, message).with_status(err.status().map(status_text))
}

/// Probe a validated host over HTTP, falling back to HTTPS once.
///
/// A response that was fetched and fully drained ends the probe, whatever
/// its status. Only a failed HTTP attempt leads to the HTTPS attempt, and
/// nothing follows HTTPS. Returns zero, one or two records.
pub async fn probe_host<F>(fetcher: &F, host: &str) -> Vec<OutcomeRecord>
where
    F: Fetcher + ?Sized,
{
    let mut records = Vec::with_capacity(2);

    for proto in [Proto::Http, Proto::Https] {
        info!("processing {} for {}", proto, host);
        let url = proto.url_for(host);

        match fetcher.get(&url).await {
            Ok(response) => {
                records.extend(classify(&response, &url, host, proto));
                break;
            }
            Err(err) => records.push(failure_record(url, proto, host, host, &err)),
        }
    }

    records
}

/// Fetch a URL target once, with its own scheme.
pub async fn probe_url<F>(fetcher: &F, target: &UrlTarget) -> Option<OutcomeRecord>
where
    F: Fetcher + ?Sized,
{
    info!("processing {}", target.raw);

    match fetcher.get(&target.raw).await {
        Ok(response) => classify(&response, &target.raw, &target.host, target.scheme),
        Err(err) => Some(failure_record(
            target.raw.clone(),
            target.scheme,
            &target.host,
            &target.raw,
            &err,
        )),
    }
}
