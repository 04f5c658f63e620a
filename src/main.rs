//! httpsweep - An HTTP/HTTPS-aware domain prober.
//!
//! Reads targets, validates hosts over TCP, probes them concurrently and
//! writes a JSON report of every attempt.

use anyhow::{Context, Result};
use clap::Parser;
use httpsweep::cli::Args;
use httpsweep::input::read_targets;
use httpsweep::logging::init_logging;
use httpsweep::net::{HttpClient, TcpReachability};
use httpsweep::output;
use httpsweep::pipeline::Pipeline;
use httpsweep::storage::ReportStore;
use httpsweep::version::{self, VersionStatus};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Timeout for the release lookup.
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = args.settings().context("failed to load settings")?;
    let config = args
        .probe_config(&settings)
        .context("invalid probe configuration")?;
    init_logging(config.verbose);

    let targets = read_targets(args.targets.as_deref()).context("failed to read targets")?;

    if !args.quiet {
        let status = match &settings.release_url {
            Some(url) => {
                let client = HttpClient::new(VERSION_CHECK_TIMEOUT)?;
                version::check(&client, url).await
            }
            None => VersionStatus::Unchecked,
        };
        output::print_banner(&status);
    }

    let store = match &args.output {
        Some(path) => ReportStore::new(path.clone()),
        None => ReportStore::temporary(),
    };
    output::print_run_header(store.path(), targets.len());

    let fetcher = Arc::new(HttpClient::new(config.request_timeout)?);
    let reachability = Arc::new(TcpReachability::new(config.reachability_timeout));
    let pipeline = Pipeline::new(config, fetcher, reachability);

    let report = pipeline.run(targets, &store).await;

    if let Err(e) = store.finish(&report) {
        error!(path = %store.path().display(), error = %e, "failed to write report");
    }

    Ok(())
}
