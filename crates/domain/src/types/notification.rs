//! Notification severities

use hoursguard_common::ErrorSeverity;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Tone of a transient user-facing message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifySeverity {
    Success,
    Warning,
    #[default]
    Error,
}

impl_domain_status_conversions!(NotifySeverity {
    Success => "success",
    Warning => "warning",
    Error => "error",
});

impl From<ErrorSeverity> for NotifySeverity {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Info | ErrorSeverity::Warning => Self::Warning,
            ErrorSeverity::Error | ErrorSeverity::Critical => Self::Error,
        }
    }
}
