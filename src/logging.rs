//! Tracing subscriber setup.
//!
//! Logs go to stderr so that stdout stays machine-readable for `--json`
//! output and the `watch` notification stream.

use tracing_subscriber::EnvFilter;

use crate::errors::Error;

/// Build the log filter: `RUST_LOG` wins when set, otherwise `level`.
/// `verbose` forces `debug`.
pub fn build_filter(level: &str, verbose: bool) -> Result<EnvFilter, Error> {
    if verbose {
        return Ok(EnvFilter::new("debug"));
    }

    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| Error::Config(format!("Invalid RUST_LOG value: {e}"))),
        _ => EnvFilter::try_new(level)
            .map_err(|e| Error::Config(format!("Invalid log level {level:?}: {e}"))),
    }
}

/// Install the global fmt subscriber.
///
/// # Errors
///
/// Returns `Error::Config` if the filter is invalid or a subscriber is already installed.
pub fn init_logging(level: &str, verbose: bool) -> Result<(), Error> {
    let filter = build_filter(level, verbose)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {e}")))
}
