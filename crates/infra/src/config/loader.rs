//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every section has defaults, so a file only needs the values it changes.
//!
//! ## Environment Variables
//! - `HOURSGUARD_STORAGE_PATH`: Store file path (required)
//! - `HOURSGUARD_LOCALE`: Message locale (`zh-CN`, `en`)
//! - `HOURSGUARD_LOG_LEVEL`: Level for Hours Guard log targets
//! - `HOURSGUARD_RETRY_MAX_ATTEMPTS`: Default retry attempt count
//! - `HOURSGUARD_RETRY_BASE_DELAY_MS`: Linear backoff base delay
//! - `HOURSGUARD_NETWORK_PROBE`: `host:port` probed by diagnostics
//! - `HOURSGUARD_UTC_OFFSET_MINUTES`: Offset used to bucket records into days
//! - `HOURSGUARD_DOWNLOAD_DIR`: Directory exports are written to
//! - `HOURSGUARD_HOST`: Host the application is served from
//! - `HOURSGUARD_HTTPS`: Whether it is served over https (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` or `./hoursguard.{json,toml}`
//! 2. `../config.{json,toml}` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use hoursguard_domain::{Config, HoursGuardError, Result, StorageConfig};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `HoursGuardError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `HOURSGUARD_STORAGE_PATH` must be present; everything else falls back to
/// the defaults.
///
/// # Errors
/// Returns `HoursGuardError::Config` if the required variable is missing or
/// an optional one has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let storage_path = env_var("HOURSGUARD_STORAGE_PATH")?;

    let mut config = Config {
        storage: StorageConfig { path: storage_path, ..StorageConfig::default() },
        ..Config::default()
    };

    if let Some(locale) = env_opt("HOURSGUARD_LOCALE") {
        config.locale = locale;
    }
    if let Some(level) = env_opt("HOURSGUARD_LOG_LEVEL") {
        config.log_level = level;
    }
    if let Some(attempts) = env_parse::<u32>("HOURSGUARD_RETRY_MAX_ATTEMPTS", "retry attempts")? {
        config.retry.max_attempts = attempts;
    }
    if let Some(delay) = env_parse::<u64>("HOURSGUARD_RETRY_BASE_DELAY_MS", "retry delay")? {
        config.retry.base_delay_ms = delay;
    }
    if let Some(target) = env_opt("HOURSGUARD_NETWORK_PROBE") {
        config.diagnostics.network_probe = Some(target);
    }
    if let Some(offset) = env_parse::<i32>("HOURSGUARD_UTC_OFFSET_MINUTES", "UTC offset")? {
        config.tracking.utc_offset_minutes = offset;
    }
    if let Some(dir) = env_opt("HOURSGUARD_DOWNLOAD_DIR") {
        config.storage.download_dir = dir;
    }
    if let Some(host) = env_opt("HOURSGUARD_HOST") {
        config.environment.host = host;
    }
    if env_bool("HOURSGUARD_HTTPS", false) {
        config.environment.scheme = "https".to_string();
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `HoursGuardError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HoursGuardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HoursGuardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HoursGuardError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => {
            toml::from_str(contents).map_err(|e| HoursGuardError::from(InfraError::from(e)))
        }
        "json" => serde_json::from_str(contents)
            .map_err(|e| HoursGuardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HoursGuardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "hoursguard.json", "hoursguard.toml"];

    let mut bases = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        bases.push(cwd.clone());
        bases.push(cwd.join(".."));
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        bases.push(exe_dir);
    }

    bases
        .iter()
        .flat_map(|base| NAMES.iter().map(move |name| base.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `HoursGuardError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        HoursGuardError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `HoursGuardError::Config` if the variable is set but invalid.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| HoursGuardError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 10] = [
        "HOURSGUARD_STORAGE_PATH",
        "HOURSGUARD_LOCALE",
        "HOURSGUARD_LOG_LEVEL",
        "HOURSGUARD_RETRY_MAX_ATTEMPTS",
        "HOURSGUARD_RETRY_BASE_DELAY_MS",
        "HOURSGUARD_NETWORK_PROBE",
        "HOURSGUARD_UTC_OFFSET_MINUTES",
        "HOURSGUARD_DOWNLOAD_DIR",
        "HOURSGUARD_HOST",
        "HOURSGUARD_HTTPS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (i, value) in ["1", "true", "yes", "on", "TRUE"].iter().enumerate() {
            let key = format!("HG_TEST_BOOL_TRUE_{i}");
            std::env::set_var(&key, value);
            assert!(env_bool(&key, false), "{value} should be true");
            std::env::remove_var(&key);
        }

        for (i, value) in ["0", "false", "no", "off"].iter().enumerate() {
            let key = format!("HG_TEST_BOOL_FALSE_{i}");
            std::env::set_var(&key, value);
            assert!(!env_bool(&key, true), "{value} should be false");
            std::env::remove_var(&key);
        }

        std::env::remove_var("HG_TEST_BOOL_MISSING");
        assert!(env_bool("HG_TEST_BOOL_MISSING", true));
        assert!(!env_bool("HG_TEST_BOOL_MISSING", false));
    }

    #[test]
    fn test_load_from_env_with_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HOURSGUARD_STORAGE_PATH", "/tmp/hoursguard-test.json");
        std::env::set_var("HOURSGUARD_LOCALE", "en");
        std::env::set_var("HOURSGUARD_LOG_LEVEL", "debug");
        std::env::set_var("HOURSGUARD_RETRY_MAX_ATTEMPTS", "5");
        std::env::set_var("HOURSGUARD_RETRY_BASE_DELAY_MS", "250");
        std::env::set_var("HOURSGUARD_NETWORK_PROBE", "example.com:443");
        std::env::set_var("HOURSGUARD_UTC_OFFSET_MINUTES", "-300");
        std::env::set_var("HOURSGUARD_HOST", "hours.example.com");
        std::env::set_var("HOURSGUARD_HTTPS", "yes");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.storage.path, "/tmp/hoursguard-test.json");
        assert_eq!(config.locale, "en");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.diagnostics.network_probe.as_deref(), Some("example.com:443"));
        assert_eq!(config.tracking.utc_offset_minutes, -300);
        assert_eq!(config.error_log.memory_cap, 100);
        assert!(!config.environment.is_development());
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(HoursGuardError::Config(_))));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HOURSGUARD_STORAGE_PATH", "/tmp/hoursguard-test.json");
        std::env::set_var("HOURSGUARD_RETRY_MAX_ATTEMPTS", "three");

        let result = load_from_env();
        clear_env();

        let err = result.expect_err("invalid attempts");
        assert!(matches!(err, HoursGuardError::Config(_)));
        assert!(err.to_string().contains("HOURSGUARD_RETRY_MAX_ATTEMPTS"));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(HoursGuardError::Config(_))));
    }

    #[test]
    fn test_parse_config_json() {
        let json = r#"{ "locale": "en", "retry": { "max_attempts": 4 } }"#;
        let config = parse_config(json, Path::new("test.json")).expect("valid JSON");
        assert_eq!(config.locale, "en");
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry.base_delay_ms, 1000);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
locale = "zh-CN"

[storage]
path = "records.json"

[tracking]
utc_offset_minutes = 60
"#;

        let config = parse_config(toml_content, Path::new("test.toml")).expect("valid TOML");
        assert_eq!(config.storage.path, "records.json");
        assert_eq!(config.tracking.utc_offset_minutes, 60);
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let result = parse_config("locale = ", Path::new("test.toml"));
        assert!(matches!(result, Err(HoursGuardError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
