//! Report persistence.
//!
//! Provides the JSON report sink that consumes the outcome stream.

mod json_store;

pub use json_store::{default_report_path, Report, ReportStore, REPORT_INFO};
