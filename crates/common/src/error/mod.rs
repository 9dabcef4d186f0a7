//! Shared error vocabulary
//!
//! - [`CommonError`]: failures that more than one crate raises (store quota,
//!   unavailable persistence, serialization, timeouts)
//! - [`ErrorClassification`]: retryability and severity, implemented by every
//!   error that can reach the error handler
//! - [`ErrorSeverity`]: decides the log level and the tone of a notification
//!
//! Crate-level errors convert from [`CommonError`] instead of repeating these
//! variants.
//!
//! | Level | Meaning | Notification |
//! |-------|---------|--------------|
//! | **Info** | expected condition, e.g. nothing recorded yet | warning toast |
//! | **Warning** | degraded but working, e.g. offline | warning toast |
//! | **Error** | the operation failed | error toast |
//! | **Critical** | internal state is broken | error toast |

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{format} is malformed: {message}")]
    Serialization { format: &'static str, message: String },

    /// A write would push a quota-limited store past its limit.
    ///
    /// The display text starts with `QuotaExceededError` so untagged copies of
    /// it are still recognised as storage failures.
    #[error("QuotaExceededError: writing {key} needs {needed} units, quota is {quota}")]
    QuotaExceeded { key: String, needed: u64, quota: u64 },

    #[error("persistent storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("'{operation}' timed out after {duration:?}")]
    Timeout { operation: String, duration: Duration },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommonError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn json(err: &impl fmt::Display) -> Self {
        Self::Serialization { format: "JSON", message: err.to_string() }
    }

    pub fn quota_exceeded(key: impl Into<String>, needed: u64, quota: u64) -> Self {
        Self::QuotaExceeded { key: key.into(), needed, quota }
    }

    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable { reason: reason.into() }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout { operation: operation.into(), duration }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Stable label for structured log fields
    pub fn error_type_name(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Timeout { .. } => "timeout",
            Self::Validation { .. } => "validation",
            Self::Internal(_) => "internal",
        }
    }
}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Timeout { .. } | Self::StorageUnavailable { .. } => ErrorSeverity::Warning,
            Self::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Classification shared by every error that can reach the error handler
pub trait ErrorClassification {
    /// Transient failures that may succeed when attempted again
    fn is_retryable(&self) -> bool;

    fn severity(&self) -> ErrorSeverity;

    fn is_critical(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
