//! Configuration validation logic.

use crate::errors::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Largest accepted lookup concurrency.
pub const MAX_CONCURRENT_LOOKUPS_LIMIT: usize = 1024;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Upper bound on concurrently resolving triggers.
    pub max_concurrent_lookups: usize,
    /// Log filter directive.
    pub log_level: String,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Database path is not empty
    /// - Lookup concurrency is between 1 and 1024
    /// - Log level parses as a tracing filter directive
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_database_path()?;
        self.validate_max_concurrent_lookups()?;
        self.validate_log_level()?;

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_max_concurrent_lookups(&self) -> Result<(), Error> {
        if self.max_concurrent_lookups == 0
            || self.max_concurrent_lookups > MAX_CONCURRENT_LOOKUPS_LIMIT
        {
            return Err(Error::Config(format!(
                "Invalid max concurrent lookups: {} (must be between 1 and {})",
                self.max_concurrent_lookups, MAX_CONCURRENT_LOOKUPS_LIMIT
            )));
        }

        Ok(())
    }

    fn validate_log_level(&self) -> Result<(), Error> {
        if self.log_level.trim().is_empty() {
            return Err(Error::Config("Log level cannot be empty".to_string()));
        }

        EnvFilter::try_new(&self.log_level)
            .map(|_| ())
            .map_err(|e| Error::Config(format!("Invalid log level {:?}: {e}", self.log_level)))
    }
}
