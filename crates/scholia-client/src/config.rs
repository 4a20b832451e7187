//! Client configuration for the retrieval backend.
//!
//! Supports reading settings from `~/.config/scholia/config.json`, with
//! environment variable overrides (`SCHOLIA_BACKEND_URL`,
//! `SCHOLIA_TIMEOUT_SECS`) taking precedence over the file.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use scholia_core::{Result, ScholiaError};

/// Default base URL of the retrieval backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Default client-side request timeout in seconds. A request exceeding it is
/// classified as a transport failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for talking to the retrieval backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the retrieval backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration with priority: environment variables over the
    /// config file over built-in defaults.
    ///
    /// A missing config file is not an error; a present but unreadable or
    /// malformed one is.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Reads configuration from a specific JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScholiaError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|e| {
            ScholiaError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(
            env::var("SCHOLIA_BACKEND_URL").ok(),
            env::var("SCHOLIA_TIMEOUT_SECS").ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        backend_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<()> {
        if let Some(url) = backend_url
            && !url.trim().is_empty()
        {
            self.backend_url = url;
        }
        if let Some(raw) = timeout_secs {
            self.timeout_secs = raw
                .parse()
                .map_err(|_| ScholiaError::config(format!("Invalid SCHOLIA_TIMEOUT_SECS: {raw}")))?;
        }
        Ok(())
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Returns the path to the configuration file: ~/.config/scholia/config.json
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("scholia").join("config.json"))
}
