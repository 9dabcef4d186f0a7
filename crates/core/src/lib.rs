//! # Hours Guard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Failure classification, retries, the error log and diagnostics
//! - The switchable storage handle used by the storage fallback
//! - Work-hours tracking on top of both
//!
//! ## Architecture Principles
//! - Only depends on `hoursguard-common` and `hoursguard-domain`
//! - No file system, network or platform code
//! - All external dependencies via traits in [`errors::ports`]

pub mod errors;
pub mod storage;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use errors::ports::{EnvironmentProbe, FileDownloader, KeyValueStore, Localizer, Notifier};
pub use errors::{
    ErrorClassifier, ErrorHandler, ErrorHandlerPorts, ErrorLogStore, FallbackAction, FallbackValue,
    HandleOutcome, Strategy,
};
pub use storage::StorageHandle;
pub use tracking::HoursService;
