//! Configuration system for georemind.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::errors::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use loader::ConfigFile;

/// Default number of trigger lookups allowed to run at once.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite reminder database.
    #[serde(default)]
    pub database_path: PathBuf,

    /// Upper bound on concurrently resolving transition triggers.
    #[serde(default)]
    pub max_concurrent_lookups: usize,

    /// Log filter directive (e.g. "info", "georemind=debug").
    #[serde(default)]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            database_path: home.join(".georemind").join("reminders.db"),
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&loader::config_file_path())
    }

    /// Like [`Config::load`], reading the config file at `config_path`.
    pub fn load_from(config_path: &Path) -> Result<Self, Error> {
        let file_config = loader::load_from_path(config_path)?;

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(
            &mut config.database_path,
            &mut config.max_concurrent_lookups,
            &mut config.log_level,
        )?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = file.database_path;
        }
        if !file.log_level.trim().is_empty() {
            self.log_level = file.log_level;
        }
        self.max_concurrent_lookups = file.max_concurrent_lookups;
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            database_path: self.database_path.clone(),
            max_concurrent_lookups: self.max_concurrent_lookups,
            log_level: self.log_level.clone(),
        };

        validator.validate()
    }

    /// Ensure the parent directory of the database exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
