//! Wall-clock abstraction for testability
//!
//! Services that stamp records or compare against "the last 24 hours" take a
//! [`Clock`] so tests can pin and advance time deterministically.

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
pub fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
