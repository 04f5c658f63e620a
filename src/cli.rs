//! Command-line interface definitions for httpsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags left
//! unset fall back to the persisted [`AppSettings`].

use crate::config::{AppSettings, ProbeConfig};
use crate::error::ConfigResult;
use crate::types::PortSpec;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent HTTP/HTTPS-aware domain prober.
///
/// Reads hostnames and URLs, checks which hosts accept TCP connections,
/// probes them over HTTP with an HTTPS fallback and writes a JSON report.
#[derive(Parser, Debug)]
#[command(name = "httpsweep")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An HTTP/HTTPS-aware domain probe", long_about = None)]
pub struct Args {
    /// Target hostname/URL, or a file with one target per line (stdin if omitted)
    #[arg(short, long, value_name = "TARGET|FILE")]
    pub targets: Option<String>,

    /// Workers per pipeline stage
    #[arg(long, value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Candidate ports for host validation (e.g., "80,443", "80,8000-8010")
    #[arg(short, long, value_name = "SPEC")]
    pub ports: Option<PortSpec>,

    /// Show per-target diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Report file (defaults to a fresh file in the temp directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to an alternate settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_threads(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("threads must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Args {
    /// Load settings from `--config`, or from the default location.
    pub fn settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        }
    }

    /// Build the probe configuration, flags taking precedence over `settings`.
    pub fn probe_config(&self, settings: &AppSettings) -> ConfigResult<ProbeConfig> {
        let ports = match &self.ports {
            Some(ports) => ports.clone(),
            None => settings.port_spec()?,
        };

        Ok(ProbeConfig::new()
            .with_threads(self.threads.unwrap_or(settings.threads))
            .with_timeout(Duration::from_secs(self.timeout.unwrap_or(settings.timeout_secs)))
            .with_ports(ports)
            .with_verbose(self.verbose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let args = Args::try_parse_from(["httpsweep"]).unwrap();
        assert!(args.targets.is_none());

        let settings = AppSettings {
            threads: 7,
            timeout_secs: 4,
            ports: "8080".to_string(),
            release_url: None,
        };
        let config = args.probe_config(&settings).unwrap();

        assert_eq!(config.workers(), 7);
        assert_eq!(config.request_timeout, Duration::from_secs(4));
        assert_eq!(config.candidate_ports, vec![Port::new(8080).unwrap()]);
        assert!(!config.verbose);
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Args::try_parse_from([
            "httpsweep", "-t", "hosts.txt", "--threads", "3", "--timeout", "20", "-p", "443,80", "-v",
        ])
        .unwrap();

        let config = args.probe_config(&AppSettings::default()).unwrap();

        assert_eq!(args.targets.as_deref(), Some("hosts.txt"));
        assert_eq!(config.workers(), 3);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.candidate_ports, vec![Port::HTTPS, Port::HTTP]);
        assert!(config.verbose);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Args::try_parse_from(["httpsweep", "--threads", "0"]).is_err());
        assert!(Args::try_parse_from(["httpsweep", "--timeout", "0"]).is_err());
        assert!(Args::try_parse_from(["httpsweep", "-p", "0"]).is_err());
        assert!(Args::try_parse_from(["httpsweep", "-p", "90-80"]).is_err());
    }

    #[test]
    fn test_bad_settings_ports() {
        let args = Args::try_parse_from(["httpsweep"]).unwrap();
        let settings = AppSettings {
            ports: "http".to_string(),
            ..AppSettings::default()
        };
        assert!(args.probe_config(&settings).is_err());
    }
}
