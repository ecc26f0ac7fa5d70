//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file
//! means defaults. Environment variables override the file:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `QUOTEBOOK_HOME` | data directory (default: OS data dir via `directories`) |
//! | `QUOTEBOOK_REMOTE_URL` | remote collection URL (empty string disables sync) |

use crate::error::{QuoteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "QUOTEBOOK_HOME";
pub const REMOTE_URL_ENV: &str = "QUOTEBOOK_REMOTE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotebookConfig {
    /// Remote collection URL. `None` keeps the catalog local only.
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Seconds between reconciliation cycles in watch mode.
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    /// Per-request timeout for the remote collection.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Push every quote back to the remote after merging.
    #[serde(default = "default_push_on_sync")]
    pub push_on_sync: bool,
}

fn default_sync_interval() -> u64 {
    60
}

fn default_request_timeout() -> u64 {
    10
}

fn default_push_on_sync() -> bool {
    true
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            sync_interval_secs: default_sync_interval(),
            request_timeout_secs: default_request_timeout(),
            push_on_sync: default_push_on_sync(),
        }
    }
}

impl QuotebookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuoteError::Io)?;
        let config: QuotebookConfig = serde_json::from_str(&content).map_err(|e| {
            QuoteError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).map_err(QuoteError::Io)?;
        Ok(())
    }

    /// Apply an override for the remote URL; blank disables the remote.
    pub fn with_remote_override(mut self, remote: Option<String>) -> Self {
        if let Some(url) = remote {
            let url = url.trim();
            self.remote_url = if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            };
        }
        self
    }

    /// The remote URL, if one is configured and non-blank.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.sync_interval_secs == 0 {
            return Err(QuoteError::Config(
                "sync_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(QuoteError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the data directory: `QUOTEBOOK_HOME` if set, else the OS data dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "quotebook", "quotebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuoteError::Config("Could not determine data directory".to_string()))
}
