//! Configuration Management
//!
//! Settings come from the command line, then the environment, then a YAML
//! file under the user's config directory, then built-in defaults. The
//! provider region is special: `REGION` is read on every call so a running
//! gateway follows changes to it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable holding the provider region, read per call
pub const REGION_ENV: &str = "REGION";

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const DEFAULT_API_URL: &str = "https://api.civo.com";

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub listen: SocketAddr,
    /// Civo API base URL
    pub api_url: String,
    /// Region used when `REGION` is unset
    pub default_region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_url: DEFAULT_API_URL.to_string(),
            default_region: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("civo-opencp").join("config.yaml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; a file that
    /// was asked for explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply values given on the command line or through the environment
    pub fn with_overrides(
        mut self,
        listen: Option<SocketAddr>,
        api_url: Option<String>,
        default_region: Option<String>,
    ) -> Self {
        if let Some(listen) = listen {
            self.listen = listen;
        }
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if default_region.is_some() {
            self.default_region = default_region;
        }
        self
    }

    /// Region for a new provider session: `REGION` now, else the configured default
    pub fn region(&self) -> Option<String> {
        pick_region(std::env::var(REGION_ENV).ok(), self.default_region.as_deref())
    }
}

/// First non-blank of the environment value and the configured default
pub fn pick_region(env: Option<String>, default: Option<&str>) -> Option<String> {
    env.map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .or_else(|| {
            default
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
        })
}
