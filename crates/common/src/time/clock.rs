//! Clock trait with system and mock implementations
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "runtime")]
//! # {
//! use chrono::{Duration, TimeZone, Utc};
//! use hoursguard_common::time::{Clock, MockClock};
//!
//! let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
//! let clock = MockClock::at(start);
//! clock.advance(Duration::minutes(90));
//! assert_eq!(clock.now() - start, Duration::minutes(90));
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of wall-clock time
pub trait Clock: Send + Sync + 'static {
    /// Current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient cloning
impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the code under test.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock pinned at the current system time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a mock clock pinned at `time`
    pub fn at(time: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(time)) }
    }

    /// Move time forward (or backward, for negative durations)
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current += duration;
    }

    /// Jump to an absolute time
    pub fn set(&self, time: DateTime<Utc>) {
        *self.current.lock() = time;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}
