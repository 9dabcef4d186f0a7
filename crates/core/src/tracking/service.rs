//! Work-hours tracking service - core business logic

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use hoursguard_common::Clock;
use hoursguard_domain::constants::RECORDS_KEY;
use hoursguard_domain::{
    ClockKind, ClockRecord, DailyStats, Failure, FailureKind, HoursGuardError, MonthlyStats,
    Result, TrackingConfig, WorkDuration, WorkSession,
};
use tracing::{debug, info, instrument};

use crate::errors::ports::KeyValueStore;
use crate::errors::{ErrorHandler, FallbackValue, HandleOutcome};

/// Clock-in/clock-out recording and statistics
pub struct HoursService {
    handler: Arc<ErrorHandler>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl HoursService {
    /// Create a service bucketing days in the configured UTC offset
    pub fn new(
        handler: Arc<ErrorHandler>,
        clock: Arc<dyn Clock>,
        config: &TrackingConfig,
    ) -> Result<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60).ok_or_else(|| {
            HoursGuardError::Config(format!(
                "utc_offset_minutes out of range: {}",
                config.utc_offset_minutes
            ))
        })?;
        Ok(Self { handler, clock, offset })
    }

    /// Record a clock-in; rejected while a session is open
    #[instrument(skip(self))]
    pub fn clock_in(&self, note: Option<String>) -> Result<ClockRecord> {
        self.punch(ClockKind::In, note)
    }

    /// Record a clock-out; rejected when no session is open
    #[instrument(skip(self))]
    pub fn clock_out(&self, note: Option<String>) -> Result<ClockRecord> {
        self.punch(ClockKind::Out, note)
    }

    /// The stored record set, oldest first.
    ///
    /// A corrupted set is routed to the error handler, which backs it up and
    /// resets it; the result is then empty.
    pub fn records(&self) -> Result<Vec<ClockRecord>> {
        let raw = self.with_storage_fallback(|store| store.get(RECORDS_KEY))?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<ClockRecord>>(&raw) {
            Ok(mut records) => {
                records.sort_by_key(|record| record.timestamp);
                Ok(records)
            }
            Err(err) => {
                let failure = Failure::tagged(
                    FailureKind::ParseFailure,
                    format!("JSON parse error in work records: {err}"),
                );
                self.handler.handle_error(failure, "records.load");
                Ok(Vec::new())
            }
        }
    }

    /// Elapsed time between `start` and `end`.
    ///
    /// `end` before `start` is handled as a computation failure and yields
    /// the zero duration.
    pub fn session_duration(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> WorkDuration {
        if end < start {
            let err = HoursGuardError::Computation(format!(
                "session ends ({end}) before it starts ({start})"
            ));
            return match self.handler.handle_error(err, "duration") {
                HandleOutcome::Recovered(FallbackValue::ZeroDuration(zero)) => zero,
                _ => WorkDuration::zero(),
            };
        }

        let minutes = (end - start).num_minutes().max(0);
        WorkDuration::from_minutes(minutes.unsigned_abs())
    }

    /// Current date in the configured offset
    pub fn local_date(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.offset).date_naive()
    }

    /// Statistics for the current local day
    pub fn today(&self) -> Result<DailyStats> {
        self.daily_stats(self.local_date())
    }

    pub fn daily_stats(&self, date: NaiveDate) -> Result<DailyStats> {
        let sessions = self.sessions()?;
        Ok(self
            .group_by_day(sessions)
            .remove(&date)
            .unwrap_or_else(|| DailyStats::empty(date)))
    }

    /// Statistics for the current local month
    pub fn this_month(&self) -> Result<MonthlyStats> {
        let today = self.local_date();
        self.monthly_stats(today.year(), today.month())
    }

    pub fn monthly_stats(&self, year: i32, month: u32) -> Result<MonthlyStats> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(HoursGuardError::InvalidInput(format!("invalid month: {year}-{month}")));
        }

        let days: Vec<DailyStats> = self
            .group_by_day(self.sessions()?)
            .into_values()
            .filter(|day| day.date.year() == year && day.date.month() == month)
            .collect();

        let total: WorkDuration = days.iter().map(|day| day.total).sum();
        let days_worked = u32::try_from(days.len()).unwrap_or(u32::MAX);
        let average_per_day = if days_worked == 0 {
            WorkDuration::zero()
        } else {
            WorkDuration::from_minutes(total.total_minutes() / u64::from(days_worked))
        };

        Ok(MonthlyStats { year, month, days_worked, total, average_per_day, days })
    }

    fn punch(&self, kind: ClockKind, note: Option<String>) -> Result<ClockRecord> {
        let mut records = self.records()?;
        let open = records.last().is_some_and(|last| last.kind == ClockKind::In);

        match (kind, open) {
            (ClockKind::In, true) => {
                return Err(HoursGuardError::InvalidInput("already clocked in".into()));
            }
            (ClockKind::Out, false) => {
                return Err(HoursGuardError::InvalidInput("not clocked in".into()));
            }
            _ => {}
        }

        let record = ClockRecord::new(kind, self.clock.now(), note);
        records.push(record.clone());
        self.save(&records)?;

        info!(kind = %kind, id = %record.id, "clock event recorded");
        Ok(record)
    }

    fn save(&self, records: &[ClockRecord]) -> Result<()> {
        let json = serde_json::to_string(records)
            .map_err(|err| HoursGuardError::Internal(format!("serialize work records: {err}")))?;
        self.with_storage_fallback(|store| store.set(RECORDS_KEY, &json))
    }

    /// Run `op` against storage; on a storage failure route it to the
    /// handler and, if storage was switched to memory, run `op` once more.
    fn with_storage_fallback<T>(
        &self,
        op: impl Fn(&dyn KeyValueStore) -> Result<T>,
    ) -> Result<T> {
        let storage = self.handler.storage();
        match op(&*storage) {
            Err(err @ HoursGuardError::Storage(_)) => {
                match self.handler.handle_error(&err, "storage") {
                    HandleOutcome::Recovered(FallbackValue::StorageSwitched { .. }) => {
                        debug!("retrying storage operation in memory");
                        op(&*storage)
                    }
                    _ => Err(err),
                }
            }
            other => other,
        }
    }

    /// Pair In/Out records into sessions; an unmatched In stays open and
    /// counts up to now
    fn sessions(&self) -> Result<Vec<WorkSession>> {
        let records = self.records()?;
        let now = self.clock.now();
        let mut sessions = Vec::new();
        let mut open: Option<DateTime<Utc>> = None;

        for record in records {
            match (record.kind, open) {
                (ClockKind::In, _) => open = Some(record.timestamp),
                (ClockKind::Out, Some(start)) => {
                    sessions.push(WorkSession {
                        start,
                        end: Some(record.timestamp),
                        duration: self.session_duration(start, record.timestamp),
                    });
                    open = None;
                }
                (ClockKind::Out, None) => {
                    debug!(id = %record.id, "ignoring clock-out without clock-in");
                }
            }
        }

        if let Some(start) = open {
            let duration = if now >= start {
                self.session_duration(start, now)
            } else {
                WorkDuration::zero()
            };
            sessions.push(WorkSession { start, end: None, duration });
        }

        Ok(sessions)
    }

    fn group_by_day(&self, sessions: Vec<WorkSession>) -> BTreeMap<NaiveDate, DailyStats> {
        let mut days: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();

        for session in sessions {
            let date = session.start.with_timezone(&self.offset).date_naive();
            let day = days.entry(date).or_insert_with(|| DailyStats::empty(date));

            let start = session.start;
            day.first_in = Some(day.first_in.map_or(start, |first| first.min(start)));
            if let Some(end) = session.end {
                day.last_out = Some(day.last_out.map_or(end, |last| last.max(end)));
            }
            day.open |= session.is_open();
            day.total = day.total + session.duration;
            day.sessions.push(session);
        }

        days
    }
}
