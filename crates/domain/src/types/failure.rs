//! The value that enters the error handler

use std::error::Error as StdError;

use hoursguard_common::{ErrorClassification, ErrorSeverity};

use crate::errors::{FailureKind, HoursGuardError};

/// A failure observed somewhere in the application.
///
/// Failures raised by our own code carry a [`FailureKind`] tag; failures that
/// come from uncontrolled sources (panics, third-party errors) are untagged and
/// are classified from their message alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub message: String,
    pub stack: Option<String>,
    pub kind: Option<FailureKind>,
    pub severity: ErrorSeverity,
}

impl Failure {
    /// Untagged failure with the default `Error` severity
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), stack: None, kind: None, severity: ErrorSeverity::Error }
    }

    /// Failure tagged with its taxonomy at the raise site
    pub fn tagged(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind: Some(kind), ..Self::new(message) }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Untagged failure built from any error; the source chain becomes the
    /// stack.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let failure = Self::new(err.to_string());
        if chain.is_empty() {
            failure
        } else {
            failure.with_stack(chain.join("\n"))
        }
    }

    /// Whether this failure was explicitly tagged with `kind`
    pub fn is(&self, kind: FailureKind) -> bool {
        self.kind == Some(kind)
    }
}

impl From<&HoursGuardError> for Failure {
    fn from(err: &HoursGuardError) -> Self {
        Self::tagged(err.kind(), err.to_string()).with_severity(err.severity())
    }
}

impl From<HoursGuardError> for Failure {
    fn from(err: HoursGuardError) -> Self {
        Self::from(&err)
    }
}
