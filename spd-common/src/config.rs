//! Configuration loading and resolution
//!
//! Resolution priority for the config file location:
//! 1. Command-line argument (highest priority)
//! 2. `SPD_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/spd/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is not fatal: the dashboard starts with compiled
//! defaults and logs a warning. A file that exists but fails to parse is a
//! configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file path
pub const CONFIG_ENV_VAR: &str = "SPD_CONFIG";

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Endpoint returning the JSON object-storage listing
    pub listing_url: String,
    /// Endpoint returning the JSON array of space records
    pub spaces_api_url: String,
    /// URL prefix concatenated with a storage object key to form a
    /// retrievable URL; always kept with a trailing slash
    pub storage_base_url: String,
    /// Recognized audio extensions, in probe order
    pub audio_extensions: Vec<String>,
    /// Recognized transcript extensions
    pub transcript_extensions: Vec<String>,
    /// Assumed constant bitrate for duration estimation (kbps)
    pub assumed_bitrate_kbps: u32,
    /// Timeout for outbound HTTP requests (seconds)
    pub http_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listing_url: "http://127.0.0.1:5770/api/recordings".to_string(),
            spaces_api_url: "http://127.0.0.1:5770/api/spaces".to_string(),
            storage_base_url: "https://spaces-recordings.s3.amazonaws.com/".to_string(),
            audio_extensions: vec![
                ".mp3".to_string(),
                ".aac".to_string(),
                ".m4a".to_string(),
                ".mp4".to_string(),
            ],
            transcript_extensions: vec![".json".to_string(), ".csv".to_string()],
            assumed_bitrate_kbps: 128,
            http_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// Resolve and load the configuration.
    ///
    /// `cli_path` wins over the environment variable, which wins over the
    /// platform config directory. When no file is found anywhere, compiled
    /// defaults are used.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_path {
            return Self::load_file(path);
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_file(Path::new(&path));
        }

        // Priority 3: Platform config directory
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // Priority 4: Compiled defaults
        warn!("No config file found, using compiled defaults");
        Ok(Self::default().normalized())
    }

    /// Load configuration from a specific TOML file.
    ///
    /// A file named explicitly (CLI or environment) but missing on disk is a
    /// configuration error; an unparsable file always is.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: DashboardConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Configuration loaded");
        config.validate()?;
        Ok(config.normalized())
    }

    /// Reject configurations the catalog cannot operate with
    fn validate(&self) -> Result<()> {
        if self.storage_base_url.trim().is_empty() {
            return Err(Error::Config("storage_base_url must not be empty".to_string()));
        }
        if self.audio_extensions.is_empty() {
            return Err(Error::Config("audio_extensions must not be empty".to_string()));
        }
        if self.assumed_bitrate_kbps == 0 {
            return Err(Error::Config("assumed_bitrate_kbps must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Normalize URL fields: the storage base keeps exactly one trailing
    /// slash so `base + key` forms a valid URL
    fn normalized(mut self) -> Self {
        while self.storage_base_url.ends_with('/') {
            self.storage_base_url.pop();
        }
        self.storage_base_url.push('/');
        self
    }
}

/// Platform config file path (`<config_dir>/spd/config.toml`)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spd").join("config.toml"))
}
