//! Output formatting module.
//!
//! Live per-response lines go to stdout; everything diagnostic goes through
//! `tracing` to stderr (see [`crate::logging`]).

mod live;
mod plain;

pub use live::{live_line, print_live};
pub use plain::{print_banner, print_error, print_report_saved, print_run_header, version_tag};
