//! Application settings and paths.
//!
//! Persisted defaults live in the XDG config directory
//! (`~/.config/httpsweep/settings.json`). A missing file means defaults;
//! command-line flags override whatever is loaded.

use crate::error::{ConfigError, ConfigResult};
use crate::types::PortSpec;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/httpsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories. Nothing is created on disk.
    pub fn resolve() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "httpsweep", "httpsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default worker count per stage.
    pub threads: usize,
    /// Default HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Default candidate ports for host validation.
    pub ports: String,
    /// Latest-release endpoint for the version check (GitHub releases API shape).
    pub release_url: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            threads: 40,
            timeout_secs: 10,
            ports: PortSpec::default().to_string(),
            release_url: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::resolve()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Parse the configured port list.
    pub fn port_spec(&self) -> ConfigResult<PortSpec> {
        Ok(self.ports.parse()?)
    }
}
