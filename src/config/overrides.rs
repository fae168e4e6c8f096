//! Environment variable overrides for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::env_parser;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(
    database_path: &mut PathBuf,
    max_concurrent_lookups: &mut usize,
    log_level: &mut String,
) -> Result<(), Error> {
    env_parser::apply_database_path_override(database_path)?;
    env_parser::apply_max_concurrent_lookups_override(max_concurrent_lookups)?;
    env_parser::apply_log_level_override(log_level)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests_utils::{set_env_var, ENV_MUTEX};

    fn cleanup_env_vars() {
        crate::config::tests_utils::cleanup_env_vars(&[
            "GEOREMIND_DATABASE_PATH",
            "GEOREMIND_MAX_CONCURRENT_LOOKUPS",
            "GEOREMIND_LOG_LEVEL",
        ]);
    }

    fn defaults() -> (PathBuf, usize, String) {
        (PathBuf::from("/default"), 8, "info".to_string())
    }

    #[test]
    fn test_env_var_overrides_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        set_env_var("GEOREMIND_DATABASE_PATH", "/custom/path/reminders.db");
        set_env_var("GEOREMIND_MAX_CONCURRENT_LOOKUPS", "32");
        set_env_var("GEOREMIND_LOG_LEVEL", "georemind=debug");

        let (mut database_path, mut max_concurrent_lookups, mut log_level) = defaults();
        apply_env_overrides(&mut database_path, &mut max_concurrent_lookups, &mut log_level)
            .unwrap();

        assert_eq!(database_path, PathBuf::from("/custom/path/reminders.db"));
        assert_eq!(max_concurrent_lookups, 32);
        assert_eq!(log_level, "georemind=debug");

        cleanup_env_vars();
    }

    #[test]
    fn test_unset_env_keeps_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        let (mut database_path, mut max_concurrent_lookups, mut log_level) = defaults();
        apply_env_overrides(&mut database_path, &mut max_concurrent_lookups, &mut log_level)
            .unwrap();

        assert_eq!((database_path, max_concurrent_lookups, log_level), defaults());
    }

    #[test]
    fn test_invalid_max_concurrent_lookups() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        set_env_var("GEOREMIND_MAX_CONCURRENT_LOOKUPS", "invalid");

        let (mut database_path, mut max_concurrent_lookups, mut log_level) = defaults();
        let result =
            apply_env_overrides(&mut database_path, &mut max_concurrent_lookups, &mut log_level);

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_empty_env_var_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        set_env_var("GEOREMIND_DATABASE_PATH", "");

        let (mut database_path, mut max_concurrent_lookups, mut log_level) = defaults();
        let result =
            apply_env_overrides(&mut database_path, &mut max_concurrent_lookups, &mut log_level);

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_whitespace_env_var_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        set_env_var("GEOREMIND_LOG_LEVEL", "   ");

        let (mut database_path, mut max_concurrent_lookups, mut log_level) = defaults();
        let result =
            apply_env_overrides(&mut database_path, &mut max_concurrent_lookups, &mut log_level);

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }
}
