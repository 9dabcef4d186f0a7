//! Resilience patterns for fault tolerance and error handling
//!
//! This module provides **generic, reusable** retry logic: an attempt loop
//! with a configurable backoff strategy that reports how many attempts were
//! spent and how long it waited. It is deliberately free of any notion of
//! notifications or error logs; the error-handling service in
//! `hoursguard-core` layers those on top.
//!
//! Delays go through `tokio::time::sleep`, so tests can drive them with a
//! paused runtime (`#[tokio::test(start_paused = true)]`).

pub mod retry;

// Re-export retry types
pub use retry::{
    BackoffStrategy, RetryConfig, RetryConfigBuilder, RetryError, RetryExecutor, RetryOutcome,
    RetryResult,
};
