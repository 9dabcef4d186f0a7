//! # Hours Guard Domain
//!
//! Business domain types and models for Hours Guard.
//!
//! This crate contains:
//! - Error records, failures and diagnostics reports
//! - Work-hours records and statistics
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - Depends only on the foundation tier of `hoursguard-common`
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
