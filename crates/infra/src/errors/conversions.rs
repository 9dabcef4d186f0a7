//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use hoursguard_domain::HoursGuardError;
use serde_json::error::Category;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HoursGuardError);

impl From<InfraError> for HoursGuardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HoursGuardError> for InfraError {
    fn from(value: HoursGuardError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHoursGuardError {
    fn into_hoursguard(self) -> HoursGuardError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → HoursGuardError */
/* -------------------------------------------------------------------------- */

impl IntoHoursGuardError for IoError {
    fn into_hoursguard(self) -> HoursGuardError {
        match self.kind() {
            ErrorKind::NotFound => HoursGuardError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                HoursGuardError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::InvalidData => HoursGuardError::Parse(self.to_string()),
            ErrorKind::TimedOut
            | ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable => HoursGuardError::Network(self.to_string()),
            _ => HoursGuardError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_hoursguard())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HoursGuardError */
/* -------------------------------------------------------------------------- */

impl IntoHoursGuardError for JsonError {
    fn into_hoursguard(self) -> HoursGuardError {
        match self.classify() {
            Category::Io => HoursGuardError::Storage(format!("JSON I/O failure: {self}")),
            Category::Syntax | Category::Data | Category::Eof => {
                HoursGuardError::Parse(format!("invalid JSON: {self}"))
            }
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_hoursguard())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → HoursGuardError */
/* -------------------------------------------------------------------------- */

impl IntoHoursGuardError for TomlError {
    fn into_hoursguard(self) -> HoursGuardError {
        HoursGuardError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_hoursguard())
    }
}
