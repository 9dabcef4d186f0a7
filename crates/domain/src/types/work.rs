//! Work-hours types
//!
//! This module holds the records and statistics of the tracking feature:
//! - Clock events as they are persisted
//! - Durations and sessions derived from paired events
//! - Daily and monthly aggregates

use std::ops::Add;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;

/* -------------------------------------------------------------------------- */
/* Clock Records */
/* -------------------------------------------------------------------------- */

/// Direction of a clock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    In,
    Out,
}

impl_domain_status_conversions!(ClockKind {
    In => "in",
    Out => "out",
});

/// A single clock-in or clock-out event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRecord {
    pub id: Uuid,
    pub kind: ClockKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ClockRecord {
    pub fn new(kind: ClockKind, timestamp: DateTime<Utc>, note: Option<String>) -> Self {
        Self { id: Uuid::new_v4(), kind, timestamp, note }
    }
}

/* -------------------------------------------------------------------------- */
/* Durations */
/* -------------------------------------------------------------------------- */

/// Elapsed working time, normalized so `minutes < 60`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl WorkDuration {
    pub const fn zero() -> Self {
        Self { hours: 0, minutes: 0 }
    }

    pub const fn from_minutes(total: u64) -> Self {
        Self { hours: total / 60, minutes: total % 60 }
    }

    pub const fn total_minutes(&self) -> u64 {
        self.hours * 60 + self.minutes
    }

    pub const fn is_zero(&self) -> bool {
        self.total_minutes() == 0
    }
}

impl Add for WorkDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_minutes(self.total_minutes() + rhs.total_minutes())
    }
}

impl std::iter::Sum for WorkDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl std::fmt::Display for WorkDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

/// A clock-in paired with its clock-out, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub start: DateTime<Utc>,
    /// `None` while the session is still open
    pub end: Option<DateTime<Utc>>,
    pub duration: WorkDuration,
}

impl WorkSession {
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/* -------------------------------------------------------------------------- */
/* Statistics */
/* -------------------------------------------------------------------------- */

/// Totals for one calendar day in the configured offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub sessions: Vec<WorkSession>,
    pub total: WorkDuration,
    pub first_in: Option<DateTime<Utc>>,
    pub last_out: Option<DateTime<Utc>>,
    /// A session is still running
    pub open: bool,
}

impl DailyStats {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sessions: Vec::new(),
            total: WorkDuration::zero(),
            first_in: None,
            last_out: None,
            open: false,
        }
    }

    pub fn worked(&self) -> bool {
        !self.sessions.is_empty()
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub days_worked: u32,
    pub total: WorkDuration,
    /// Average over worked days only
    pub average_per_day: WorkDuration,
    /// Worked days in date order
    pub days: Vec<DailyStats>,
}
