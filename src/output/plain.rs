//! Plain text output formatting.
//!
//! Banner, run header and one-off status messages.

use crate::version::VersionStatus;
use console::style;
use std::path::Path;

const BANNER: &str = r"
    __    __  __
   / /_  / /_/ /_____  ______      _____  ___  ____
  / __ \/ __/ __/ __ \/ ___/ | /| / / _ \/ _ \/ __ \
 / / / / /_/ /_/ /_/ (__  )| |/ |/ /  __/  __/ /_/ /
/_/ /_/\__/\__/ .___/____/ |__/|__/\___/\___/ .___/
             /_/                           /_/
";

/// Render the version tag shown under the banner.
pub fn version_tag(status: &VersionStatus) -> String {
    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    match status {
        VersionStatus::Latest => format!("{} {}", version, style("latest").green()),
        VersionStatus::Outdated(latest) => {
            format!("{} {} ({})", version, style("outdated").red(), latest)
        }
        VersionStatus::Unknown => format!("{} {}", version, style("unknown").magenta()),
        VersionStatus::Unchecked => version,
    }
}

/// Print the banner with version information.
pub fn print_banner(status: &VersionStatus) {
    println!("{}", style(BANNER).cyan());
    println!("\t\t{}", version_tag(status));
    println!();
}

/// Print the run header before probing begins.
pub fn print_run_header(report_path: &Path, targets: usize) {
    println!(
        "{} {} v{} {}",
        style("::").dim(),
        style("httpsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION"),
        style("— an HTTP/HTTPS-aware domain probe").dim()
    );
    println!(
        "{} Probing {} targets",
        style("::").dim(),
        style(targets).white().bold()
    );
    println!(
        "{} Generating report at {}",
        style("::").dim(),
        report_path.display()
    );
    println!();
}

/// Print the final report location.
pub fn print_report_saved(path: &Path) {
    println!();
    println!("{} Report saved to {}", style("::").dim(), path.display());
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("error:").red().bold(), msg);
}
