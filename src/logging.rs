//! Diagnostic logging.
//!
//! All diagnostics go to stderr through `tracing`. Verbose runs show
//! per-target progress and failures; quiet runs only show errors.
//! `RUST_LOG` overrides both.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "info" } else { "error" };
    format!("{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
