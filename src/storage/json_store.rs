//! JSON report sink.
//!
//! Drains the pipeline's result stream into a single report document and
//! writes it, pretty-printed, to one file per run.

use crate::error::{ReportError, ReportResult};
use crate::types::OutcomeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Value of the report's `info` field.
pub const REPORT_INFO: &str = "httpsweep-output";

/// A complete run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub info: String,
    pub version: String,
    /// When the report was started.
    pub timestamp: DateTime<Utc>,
    /// Records in completion order.
    pub data_output: Vec<OutcomeRecord>,
}

impl Report {
    /// Create an empty report stamped now.
    pub fn new() -> Self {
        Self {
            info: REPORT_INFO.to_string(),
            version: crate::version::CURRENT_VERSION.to_string(),
            timestamp: Utc::now(),
            data_output: Vec::new(),
        }
    }

    pub fn push(&mut self, record: OutcomeRecord) {
        self.data_output.push(record);
    }

    pub fn len(&self) -> usize {
        self.data_output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_output.is_empty()
    }

    /// Number of error records.
    pub fn error_count(&self) -> usize {
        self.data_output.iter().filter(|r| r.is_error).count()
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Default report location: `<temp dir>/httpsweep-<unix nanos>.json`.
pub fn default_report_path() -> PathBuf {
    let now = Utc::now();
    let stamp = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000));
    std::env::temp_dir().join(format!("httpsweep-{}.json", stamp))
}

/// File-backed report sink.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a sink writing to [`default_report_path`].
    pub fn temporary() -> Self {
        Self::new(default_report_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain `results` until every producer has hung up.
    pub async fn collect(&self, mut results: UnboundedReceiver<OutcomeRecord>) -> Report {
        let mut report = Report::new();
        while let Some(record) = results.recv().await {
            report.push(record);
        }
        debug!(records = report.len(), "result stream closed");
        report
    }

    /// Write `report` to the sink's path.
    pub fn save(&self, report: &Report) -> ReportResult<()> {
        let content = serde_json::to_string_pretty(report)?;

        fs::write(&self.path, content).map_err(|e| ReportError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write `report` and announce its path if it holds any records.
    ///
    /// The document is written even when empty.
    pub fn finish(&self, report: &Report) -> ReportResult<()> {
        self.save(report)?;
        info!(
            records = report.len(),
            errors = report.error_count(),
            path = %self.path.display(),
            "report written"
        );

        if !report.is_empty() {
            crate::output::print_report_saved(&self.path);
        }
        Ok(())
    }
}
