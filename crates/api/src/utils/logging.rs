//! Logging setup and command execution logging

use std::time::Duration;

use hoursguard_common::duration_ms;
use hoursguard_domain::{HoursGuardError, Result};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: other crates at `warn`, ours at
/// `level`
pub fn default_filter(level: &str) -> String {
    format!("warn,hoursguard={level}")
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, falling back to [`default_filter`] with the
/// configured `level`. Output goes to stderr so command output on stdout
/// stays machine-readable.
///
/// # Errors
/// Returns `HoursGuardError::Config` if `level` is not a valid level or a
/// subscriber is already installed.
pub fn init_logging(json: bool, level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => fallback_filter(level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true).with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|e| HoursGuardError::Config(format!("logging already initialized: {e}")))
}

fn fallback_filter(level: &str) -> Result<EnvFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|e| HoursGuardError::Config(format!("Invalid log level '{level}': {e}")))?;
    EnvFilter::try_new(default_filter(level))
        .map_err(|e| HoursGuardError::Config(format!("Invalid log filter: {e}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` should be a stable identifier such as `"tracking::clock_in"`;
/// `error_type` is the failed result's [`HoursGuardError::label`].
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = duration_ms(elapsed);

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

#[cfg(test)]
mod tests {
    use hoursguard_domain::constants::DEFAULT_LOG_LEVEL;

    use super::*;

    #[test]
    fn default_filter_scopes_level_to_our_targets() {
        assert_eq!(default_filter("debug"), "warn,hoursguard=debug");
        assert!(fallback_filter(DEFAULT_LOG_LEVEL).is_ok());
        assert!(fallback_filter("TRACE").is_ok());
    }

    #[test]
    fn unknown_level_is_a_config_error() {
        assert!(matches!(fallback_filter("chatty"), Err(HoursGuardError::Config(_))));
    }
}
