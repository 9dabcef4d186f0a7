//! Work-hours tracking commands

use chrono::Datelike;
use hoursguard_domain::{ClockRecord, DailyStats, HoursGuardError, MonthlyStats, Result};
use tracing::info;

use crate::utils::command_helpers::execute_logged;
use crate::AppContext;

/// Record a clock-in
pub fn clock_in(ctx: &AppContext, note: Option<String>) -> Result<ClockRecord> {
    execute_logged("tracking::clock_in", || {
        info!(command = "tracking::clock_in", "Clocking in");
        ctx.hours.clock_in(note)
    })
}

/// Record a clock-out
pub fn clock_out(ctx: &AppContext, note: Option<String>) -> Result<ClockRecord> {
    execute_logged("tracking::clock_out", || {
        info!(command = "tracking::clock_out", "Clocking out");
        ctx.hours.clock_out(note)
    })
}

/// Statistics for the current day
pub fn today_stats(ctx: &AppContext) -> Result<DailyStats> {
    execute_logged("tracking::today", || ctx.hours.today())
}

/// Statistics for a month
///
/// Without arguments the current month is used; `year` defaults to the
/// current year when only `month` is given.
pub fn month_stats(
    ctx: &AppContext,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<MonthlyStats> {
    execute_logged("tracking::month", || match (year, month) {
        (None, None) => ctx.hours.this_month(),
        (year, Some(month)) => {
            let year = year.unwrap_or_else(|| ctx.hours.local_date().year());
            ctx.hours.monthly_stats(year, month)
        }
        (Some(_), None) => {
            Err(HoursGuardError::InvalidInput("--month is required with --year".into()))
        }
    })
}
