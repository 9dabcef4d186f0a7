//! Modular common utilities shared across Hours Guard crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: errors, collections
//! - `runtime`: async infrastructure (resilience, time)
//! - `observability`: tracing events (pulled in by `runtime`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod collections;
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;
#[cfg(feature = "runtime")]
pub mod time;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use collections::BoundedLog;
#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
#[cfg(feature = "runtime")]
pub use resilience::{
    BackoffStrategy, RetryConfig, RetryConfigBuilder, RetryError, RetryExecutor, RetryOutcome,
};
#[cfg(feature = "runtime")]
pub use time::{duration_ms, Clock, MockClock, SystemClock};
