//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Persisted storage keys
pub const ERROR_LOG_KEY: &str = "hoursguard_error_log";
pub const RECORDS_KEY: &str = "work_records";
pub const RECORDS_BACKUP_KEY: &str = "work_records_backup";

// Error log capacities
pub const ERROR_LOG_MEMORY_CAP: usize = 100;
pub const ERROR_LOG_MEMORY_RETAIN: usize = 50;
pub const ERROR_LOG_PERSISTED_CAP: usize = 50;

// Retry executor
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

// Toast lifecycle
pub const TOAST_SHOW_DELAY_MS: u64 = 100;
pub const TOAST_VISIBLE_MS: u64 = 3000;
pub const TOAST_FADE_MS: u64 = 300;

// Diagnostics
pub const STORAGE_BUDGET_BYTES: u64 = 5 * 1024 * 1024;
pub const LOW_STORAGE_THRESHOLD_BYTES: u64 = 1024 * 1024;
pub const ERROR_RATE_THRESHOLD_24H: usize = 10;
pub const NETWORK_PROBE_TIMEOUT_MS: u64 = 2000;

// Capability names reported by diagnostics
pub const CAPABILITY_PERSISTENT_STORAGE: &str = "persistent_storage";
pub const CAPABILITY_STRUCTURED_SERIALIZATION: &str = "structured_serialization";
pub const CAPABILITY_ASYNC_RUNTIME: &str = "async_runtime";
pub const CAPABILITY_NETWORK_REQUESTS: &str = "network_requests";

// Export
/// Level for Hours Guard log targets when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ERROR_EXPORT_PREFIX: &str = "hoursguard-errors";
pub const JSON_MIME: &str = "application/json";

// Localization keys for the notifications and diagnostics the core emits
pub mod message_keys {
    pub const NETWORK_ERROR: &str = "error.network";
    pub const OPERATION_FAILED: &str = "error.operation_failed";
    pub const RETRY_SUCCEEDED: &str = "retry.succeeded";
    pub const RETRY_EXHAUSTED: &str = "retry.exhausted";
    pub const STORAGE_FALLBACK: &str = "storage.fallback_active";
    pub const RECORDS_RESET: &str = "records.reset";
    pub const ISSUE_LOW_STORAGE: &str = "diagnostics.issue.low_storage";
    pub const SUGGEST_CLEANUP: &str = "diagnostics.suggest.cleanup";
    pub const ISSUE_ERROR_RATE: &str = "diagnostics.issue.error_rate";
    pub const SUGGEST_RELOAD: &str = "diagnostics.suggest.reload";
    pub const ISSUE_OUTDATED_RUNTIME: &str = "diagnostics.issue.outdated_runtime";
    pub const SUGGEST_UPGRADE: &str = "diagnostics.suggest.upgrade";
}
