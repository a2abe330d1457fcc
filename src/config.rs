//! Board configuration.
//!
//! This module handles the `.kanban/config.yaml` file which stores
//! project-specific settings for the board. Every field is optional; a
//! missing file means all defaults.

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to project root.
pub const CONFIG_FILE_PATH: &str = ".kanban/config.yaml";

/// Project key used by the ticket source when a query names none.
pub const DEFAULT_PROJECT: &str = "VPC";

/// Prefix for ticket links; the ticket key is appended.
pub const DEFAULT_JIRA_BROWSE_URL: &str = "https://jira.example.com/browse/";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Project configuration for the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    /// Explicit database location. Relative paths resolve against the
    /// project directory. `None` means the per-project data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Project key used for backlog queries that do not name one.
    #[serde(default = "default_project")]
    pub default_project: String,

    /// Base URL that ticket keys are appended to for links.
    #[serde(default = "default_jira_browse_url")]
    pub jira_browse_url: String,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

fn default_jira_browse_url() -> String {
    DEFAULT_JIRA_BROWSE_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_project: default_project(),
            jira_browse_url: default_jira_browse_url(),
            log_level: default_log_level(),
        }
    }
}

impl BoardConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a base directory, falling back to defaults when the
    /// file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(base_dir)?.unwrap_or_default())
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// Work out where the database lives for this project.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the home directory
    /// cannot be determined.
    pub fn resolve_db_path(&self, base_dir: &Path) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) if path.is_absolute() => Ok(path.clone()),
            Some(path) => Ok(base_dir.join(path)),
            None => paths::project_db_path(base_dir).ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "cannot determine home directory for the board database",
                ))
            }),
        }
    }
}
