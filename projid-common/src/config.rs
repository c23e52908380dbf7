//! Resolver configuration loading
//!
//! Configuration file resolution follows a fixed priority order:
//! 1. Explicit path argument (highest priority)
//! 2. Platform config file (`<config_dir>/projid/config.toml`)
//! 3. Compiled defaults (fallback)
//!
//! A missing config file is never fatal: a warning is logged and the
//! compiled defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Application directory name under the platform config/data folders
const APP_DIR: &str = "projid";

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base URL of the page; the configuration document path is resolved against it
    pub page_base_url: String,
    /// Relative path of the configuration document
    pub config_document_path: String,
    /// Primary request parameter name
    pub primary_param: String,
    /// Secondary request parameter name, consulted when the primary is absent
    pub fallback_param: String,
    /// Persistent store slot name
    pub store_key: String,
    /// Persistent store file; `None` selects the platform data folder
    pub store_path: Option<PathBuf>,
    /// Navigation target when no identifier can be resolved
    pub fallback_destination: String,
    /// Blocking notice shown before the fallback navigation
    pub redirect_notice: String,
    /// Optional fetch timeout in milliseconds (no timeout when unset)
    pub fetch_timeout_ms: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            page_base_url: "http://localhost:8000/".to_string(),
            config_document_path: "project_config.json".to_string(),
            primary_param: "projectId".to_string(),
            fallback_param: "id".to_string(),
            store_key: "currentProjectId".to_string(),
            store_path: None,
            fallback_destination: "dashboard.html".to_string(),
            redirect_notice: "No project selected. Returning to the dashboard.".to_string(),
            fetch_timeout_ms: None,
        }
    }
}

impl ResolverConfig {
    /// Load configuration, falling back to compiled defaults
    ///
    /// An explicit path that exists but cannot be parsed is an error. The
    /// platform config file is best-effort: parse failures are logged and
    /// the defaults are used.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // Priority 1: explicit path
        if let Some(path) = explicit_path {
            if path.exists() {
                return Self::from_file(path);
            }
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        // Priority 2: platform config file
        if let Some(path) = platform_config_path() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                    }
                }
            } else {
                debug!(path = %path.display(), "No platform config file");
            }
        }

        // Priority 3: compiled defaults
        Ok(Self::default())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("config_document_path", &self.config_document_path),
            ("primary_param", &self.primary_param),
            ("fallback_param", &self.fallback_param),
            ("store_key", &self.store_key),
            ("fallback_destination", &self.fallback_destination),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Store file location, defaulting to the platform data folder
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

/// Platform config file path (`~/.config/projid/config.toml` on Linux)
pub fn platform_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// OS-dependent default store file path
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./projid_data"))
        .join("store.toml")
}
