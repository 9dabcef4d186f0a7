//! Specialized data structures
//!
//! - **[`bounded_log`]**: insertion-ordered log with high/low watermark trimming
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "foundation")]
//! # {
//! use hoursguard_common::collections::BoundedLog;
//!
//! let mut log = BoundedLog::new(4, 2);
//! for i in 0..5 {
//!     log.push(i);
//! }
//! assert_eq!(log.to_vec(), vec![3, 4]);
//! # }
//! ```

pub mod bounded_log;

// Re-export commonly used types
pub use bounded_log::{keep_last, BoundedLog};
