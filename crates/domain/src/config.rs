//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_RETRY_ATTEMPTS, ERROR_LOG_MEMORY_CAP, ERROR_LOG_MEMORY_RETAIN,
    ERROR_LOG_PERSISTED_CAP, ERROR_RATE_THRESHOLD_24H, LOW_STORAGE_THRESHOLD_BYTES,
    NETWORK_PROBE_TIMEOUT_MS, RETRY_BASE_DELAY_MS, STORAGE_BUDGET_BYTES, TOAST_FADE_MS,
    TOAST_SHOW_DELAY_MS, TOAST_VISIBLE_MS,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    /// Level for Hours Guard log targets; `RUST_LOG` overrides it
    pub log_level: String,
    pub storage: StorageConfig,
    pub retry: RetrySettings,
    pub error_log: ErrorLogConfig,
    pub notifier: NotifierConfig,
    pub diagnostics: DiagnosticsConfig,
    pub environment: EnvironmentConfig,
    pub tracking: TrackingConfig,
}

/// Key/value storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the persistent key/value store
    pub path: String,
    /// Quota in UTF-16 code units (key + value lengths); writes beyond it fail
    pub quota_bytes: u64,
    /// Directory that exported files are written to
    pub download_dir: String,
}

/// Retry executor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

/// Error log capacities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorLogConfig {
    pub memory_cap: usize,
    pub memory_retain: usize,
    pub persisted_cap: usize,
}

/// Transient notification timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub show_delay_ms: u64,
    pub visible_ms: u64,
    pub fade_ms: u64,
}

/// Diagnostics thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub storage_budget_bytes: u64,
    pub low_storage_threshold_bytes: u64,
    pub error_rate_threshold: usize,
    /// `host:port` probed to report connectivity; `None` reports unknown
    pub network_probe: Option<String>,
    pub network_probe_timeout_ms: u64,
}

/// Where the application believes it is running
///
/// `host` and `scheme` decide whether error records are echoed to the
/// console; `user_agent` and `url` are stamped on every error record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub host: String,
    pub scheme: String,
    pub user_agent: String,
    pub url: String,
}

/// Work-hours tracking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Offset from UTC in minutes used to bucket records into days
    pub utc_offset_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "zh-CN".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            storage: StorageConfig::default(),
            retry: RetrySettings::default(),
            error_log: ErrorLogConfig::default(),
            notifier: NotifierConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            environment: EnvironmentConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "hoursguard-store.json".to_string(),
            quota_bytes: STORAGE_BUDGET_BYTES,
            download_dir: "exports".to_string(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_RETRY_ATTEMPTS, base_delay_ms: RETRY_BASE_DELAY_MS }
    }
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self {
            memory_cap: ERROR_LOG_MEMORY_CAP,
            memory_retain: ERROR_LOG_MEMORY_RETAIN,
            persisted_cap: ERROR_LOG_PERSISTED_CAP,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: TOAST_SHOW_DELAY_MS,
            visible_ms: TOAST_VISIBLE_MS,
            fade_ms: TOAST_FADE_MS,
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            storage_budget_bytes: STORAGE_BUDGET_BYTES,
            low_storage_threshold_bytes: LOW_STORAGE_THRESHOLD_BYTES,
            error_rate_threshold: ERROR_RATE_THRESHOLD_24H,
            network_probe: None,
            network_probe_timeout_ms: NETWORK_PROBE_TIMEOUT_MS,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            scheme: "file".to_string(),
            user_agent: format!("hoursguard/{}", env!("CARGO_PKG_VERSION")),
            url: "file://hoursguard".to_string(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { utc_offset_minutes: 8 * 60 }
    }
}

impl EnvironmentConfig {
    /// Development-like context: local host or a `file` scheme
    pub fn is_development(&self) -> bool {
        matches!(self.host.as_str(), "localhost" | "127.0.0.1") || self.scheme == "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "retry": { "max_attempts": 5 } }"#).unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, RETRY_BASE_DELAY_MS);
        assert_eq!(config.error_log.memory_cap, 100);
    }

    #[test]
    fn development_detection() {
        let mut env = EnvironmentConfig {
            host: "hours.example.com".into(),
            scheme: "https".into(),
            ..EnvironmentConfig::default()
        };
        assert!(!env.is_development());

        env.host = "127.0.0.1".into();
        assert!(env.is_development());

        env.host = "hours.example.com".into();
        env.scheme = "file".into();
        assert!(env.is_development());
    }
}
