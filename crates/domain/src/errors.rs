//! Error types used throughout the application

use hoursguard_common::{CommonError, ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_domain_status_conversions;

/// Main error type for Hours Guard
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HoursGuardError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Hours Guard operations
pub type Result<T> = std::result::Result<T, HoursGuardError>;

/// Failure taxonomy used to tag errors at the point they are raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    StorageFailure,
    NetworkFailure,
    ParseFailure,
    DomainComputationFailure,
    UnclassifiedFailure,
}

impl_domain_status_conversions!(FailureKind {
    StorageFailure => "storage_failure",
    NetworkFailure => "network_failure",
    ParseFailure => "parse_failure",
    DomainComputationFailure => "domain_computation_failure",
    UnclassifiedFailure => "unclassified_failure",
});

impl HoursGuardError {
    /// The taxonomy tag this error carries into the classifier
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Storage(_) => FailureKind::StorageFailure,
            Self::Network(_) => FailureKind::NetworkFailure,
            Self::Parse(_) => FailureKind::ParseFailure,
            Self::Computation(_) => FailureKind::DomainComputationFailure,
            Self::Config(_) | Self::NotFound(_) | Self::InvalidInput(_) | Self::Internal(_) => {
                FailureKind::UnclassifiedFailure
            }
        }
    }

    /// Stable label suitable for metrics/logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Computation(_) => "computation",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

impl ErrorClassification for HoursGuardError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(_) => ErrorSeverity::Warning,
            Self::NotFound(_) => ErrorSeverity::Info,
            Self::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

impl From<CommonError> for HoursGuardError {
    fn from(err: CommonError) -> Self {
        let message = err.to_string();
        match err {
            CommonError::Config { .. } => Self::Config(message),
            CommonError::Serialization { .. } => Self::Parse(message),
            CommonError::QuotaExceeded { .. } | CommonError::StorageUnavailable { .. } => {
                Self::Storage(message)
            }
            CommonError::Timeout { .. } => Self::Network(message),
            CommonError::Validation { .. } => Self::InvalidInput(message),
            CommonError::Internal(_) => Self::Internal(message),
        }
    }
}
