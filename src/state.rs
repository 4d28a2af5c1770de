//! Persisted state between runs.
//!
//! The state file is a flat JSON object:
//!
//! ```json
//! {
//!   "ip": "1.2.3.4",
//!   "update_time": 1700000000.5,
//!   "last_run_time": 1700003600.1,
//!   "last_run_update": [],
//!   "last_run_success": true
//! }
//! ```
//!
//! Keys this crate does not know about are carried through a rewrite untouched.
//! There is no locking: two concurrent runs race and the last writer wins.

use crate::error::{DynipError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Last IP successfully pushed to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Unix time of the last successful update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_update: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_success: Option<bool>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PersistedState {
    /// Load state from `path`. A missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No state file at {}, starting fresh", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let state: PersistedState = serde_json::from_str(&content).map_err(|e| {
            DynipError::Serialization(format!(
                "state file {} is not a JSON object: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!("Loaded state from {}: {:?}", path.display(), state);
        Ok(state)
    }

    /// Rewrite the whole state file.
    ///
    /// Writes a sibling temporary file and renames it into place, so an
    /// interrupted write never leaves a truncated state behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string(self)?;
        let tmp = temp_path(path);
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Remember a successful update.
    pub fn record_success(&mut self, ip: &str, now: f64) {
        self.ip = Some(ip.to_string());
        self.update_time = Some(now);
    }

    /// Bookkeeping written on every run regardless of outcome.
    pub fn record_run(&mut self, reasons: &[String], success: bool, now: f64) {
        self.last_run_time = Some(now);
        self.last_run_update = Some(reasons.to_vec());
        self.last_run_success = Some(success);
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
