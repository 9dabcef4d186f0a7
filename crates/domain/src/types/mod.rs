//! Domain data types
//!
//! - [`failure`]: what enters the error handler
//! - [`error_record`]: what the error log keeps
//! - [`diagnostics`]: the health report
//! - [`notification`]: severities for transient messages
//! - [`work`]: clock records, durations and statistics

pub mod diagnostics;
pub mod error_record;
pub mod failure;
pub mod notification;
pub mod work;

pub use diagnostics::{DiagnosticsReport, ErrorStats, NetworkInfo, StorageInfo, SystemInfo};
pub use error_record::ErrorRecord;
pub use failure::Failure;
pub use notification::NotifySeverity;
pub use work::{ClockKind, ClockRecord, DailyStats, MonthlyStats, WorkDuration, WorkSession};
