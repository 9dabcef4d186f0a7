//! Failure handling: classification, retries, the error log and diagnostics

pub mod classifier;
pub mod diagnostics;
pub mod log;
pub mod ports;
pub mod retry;
pub mod service;

pub use classifier::{ErrorClassifier, FallbackAction, Strategy};
pub use diagnostics::DiagnosticsReporter;
pub use log::ErrorLogStore;
pub use retry::NotifyingRetryExecutor;
pub use service::{ErrorHandler, ErrorHandlerPorts, FallbackValue, HandleOutcome};
