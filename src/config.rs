//! Configuration management for dynip.

use crate::error::{DynipError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional file configuration. Everything else comes from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Checkip endpoints used to discover the public IP.
    #[serde(default = "default_checkip_urls")]
    pub checkip_urls: Vec<String>,

    /// Per-request timeout for checkip endpoints, in seconds.
    #[serde(default = "default_checkip_timeout")]
    pub checkip_timeout_secs: u64,

    /// Timeout for the dynamic DNS update request, in seconds.
    #[serde(default = "default_update_timeout")]
    pub update_timeout_secs: u64,
}

pub fn default_checkip_urls() -> Vec<String> {
    vec![
        "http://checkip.dy.fi/".to_string(),
        "http://checkip.dyn.com/".to_string(),
        "http://checkip.dyndns.org/".to_string(),
        "http://ifconfig.me/ip".to_string(),
        "http://checkip.net/ip.shtml".to_string(),
    ]
}

fn default_checkip_timeout() -> u64 {
    5
}

fn default_update_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checkip_urls: default_checkip_urls(),
            checkip_timeout_secs: default_checkip_timeout(),
            update_timeout_secs: default_update_timeout(),
        }
    }
}

impl Config {
    /// Locate the config file: explicit path first, then the usual locations.
    ///
    /// Returns `None` when nothing exists on disk, in which case defaults apply.
    pub fn find(explicit: Option<PathBuf>) -> Option<PathBuf> {
        if explicit.is_some() {
            return explicit;
        }

        let candidates = [
            dirs::config_dir().map(|p| p.join("dynip/config.toml")),
            Some(PathBuf::from("/etc/dynip/config.toml")),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load the config named on the command line, or the first one found.
    ///
    /// An explicit path that does not exist is an error; the implicit
    /// locations fall back to defaults.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = &explicit {
            if !path.exists() {
                return Err(DynipError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
        }

        match Self::find(explicit) {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                Self::load_from(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.checkip_urls.is_empty() {
            return Err(DynipError::Config(
                "checkip_urls must list at least one endpoint".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn checkip_timeout(&self) -> Duration {
        Duration::from_secs(self.checkip_timeout_secs)
    }

    pub fn update_timeout(&self) -> Duration {
        Duration::from_secs(self.update_timeout_secs)
    }
}

/// Credentials for the dynamic DNS endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `user:pass`, split on the first colon.
    Basic { username: String, password: String },
    /// A bare token with no colon.
    Token(String),
}

impl Credentials {
    pub fn parse(auth: &str) -> Self {
        match auth.split_once(':') {
            Some((username, password)) => Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            None => Credentials::Token(auth.to_string()),
        }
    }
}
