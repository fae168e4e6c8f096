//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.trim().to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as a usize; range is checked later by validation.
fn parse_env_usize(name: &str, value: &str) -> Result<usize, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply GEOREMIND_DATABASE_PATH environment variable override.
pub fn apply_database_path_override(database_path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var("GEOREMIND_DATABASE_PATH") {
        *database_path = parse_env_path("GEOREMIND_DATABASE_PATH", &val)?;
    }
    Ok(())
}

/// Apply GEOREMIND_MAX_CONCURRENT_LOOKUPS environment variable override.
pub fn apply_max_concurrent_lookups_override(
    max_concurrent_lookups: &mut usize,
) -> Result<(), Error> {
    if let Ok(val) = std::env::var("GEOREMIND_MAX_CONCURRENT_LOOKUPS") {
        *max_concurrent_lookups = parse_env_usize("GEOREMIND_MAX_CONCURRENT_LOOKUPS", &val)?;
    }
    Ok(())
}

/// Apply GEOREMIND_LOG_LEVEL environment variable override.
pub fn apply_log_level_override(log_level: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var("GEOREMIND_LOG_LEVEL") {
        *log_level = parse_env_string("GEOREMIND_LOG_LEVEL", &val)?;
    }
    Ok(())
}
