//! Bounded error log with a persisted mirror
//!
//! The in-memory log holds at most `memory_cap` records and drops back to the
//! newest `memory_retain` when it overflows. Every append is also mirrored to
//! the key/value store under [`ERROR_LOG_KEY`], capped at `persisted_cap`.
//! Mirroring is best-effort: failures are logged and swallowed.
//!
//! A failure raised on the same thread while the log is being written (a
//! panic inside a store, caught by the panic hook) is not recorded; the lock
//! is not reentrant.

use std::cell::Cell;
use std::sync::Arc;

use chrono::NaiveDate;
use hoursguard_common::collections::keep_last;
use hoursguard_common::BoundedLog;
use hoursguard_domain::constants::{ERROR_EXPORT_PREFIX, ERROR_LOG_KEY, JSON_MIME};
use hoursguard_domain::{EnvironmentConfig, ErrorLogConfig, ErrorRecord, HoursGuardError, Result};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use super::ports::{FileDownloader, KeyValueStore};

/// Console channel for error records in development contexts
pub const CONSOLE_TARGET: &str = "hoursguard::console";

thread_local! {
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as holding the log lock
struct WriteGuard;

impl WriteGuard {
    fn enter() -> Option<Self> {
        WRITING.with(|writing| if writing.replace(true) { None } else { Some(Self) })
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        WRITING.with(|writing| writing.set(false));
    }
}

pub struct ErrorLogStore {
    records: Mutex<BoundedLog<ErrorRecord>>,
    store: Arc<dyn KeyValueStore>,
    persisted_cap: usize,
    echo_to_console: bool,
}

impl ErrorLogStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &ErrorLogConfig,
        environment: &EnvironmentConfig,
    ) -> Self {
        Self {
            records: Mutex::new(BoundedLog::new(config.memory_cap, config.memory_retain)),
            store,
            persisted_cap: config.persisted_cap,
            echo_to_console: environment.is_development(),
        }
    }

    /// Seed the in-memory log from the persisted mirror.
    ///
    /// Returns how many records were loaded. A missing or corrupt mirror
    /// loads nothing.
    pub fn restore(&self) -> usize {
        let persisted = self.read_persisted();
        let mut records = self.records.lock();
        for record in persisted {
            records.push(record);
        }
        records.len()
    }

    /// Append a record to memory and to the persisted mirror
    pub fn append(&self, record: ErrorRecord) {
        if self.echo_to_console {
            error!(
                target: CONSOLE_TARGET,
                context = %record.context,
                stack = %record.stack,
                timestamp = %record.timestamp,
                user_agent = %record.user_agent,
                url = %record.url,
                "{}",
                record.message
            );
        }

        let Some(_guard) = WriteGuard::enter() else {
            warn!(
                failure = %record.message,
                context = %record.context,
                "error raised while writing the error log, not recorded"
            );
            return;
        };

        // Held across both steps so concurrent appends never interleave
        let mut records = self.records.lock();
        let evicted = records.push(record.clone());
        if evicted > 0 {
            debug!(evicted, retained = records.len(), "error log trimmed");
        }

        if let Err(err) = self.persist(record) {
            warn!(error = %err, "failed to persist error record");
        }
    }

    /// Copy of the in-memory log, oldest first
    pub fn snapshot(&self) -> Vec<ErrorRecord> {
        self.records.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Empty the in-memory log and delete the persisted mirror from every
    /// backend, including a primary store that storage fell back from
    pub fn clear(&self) {
        let Some(_guard) = WriteGuard::enter() else {
            warn!("error log cleared while being written, ignored");
            return;
        };

        let mut records = self.records.lock();
        records.clear();
        if let Err(err) = self.store.purge(ERROR_LOG_KEY) {
            warn!(error = %err, "failed to remove persisted error log");
        }
    }

    /// Hand the whole log to `downloader` as pretty-printed JSON.
    ///
    /// Returns the file name, `hoursguard-errors-YYYY-MM-DD.json` for `today`.
    pub fn export(&self, downloader: &dyn FileDownloader, today: NaiveDate) -> Result<String> {
        let snapshot = self.snapshot();
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| HoursGuardError::Internal(format!("serialize error log: {err}")))?;
        let filename = export_filename(today);

        downloader.download(&filename, JSON_MIME, &content)?;
        debug!(filename = %filename, records = snapshot.len(), "error log exported");
        Ok(filename)
    }

    fn persist(&self, record: ErrorRecord) -> Result<()> {
        let mut persisted = self.read_persisted();
        persisted.push(record);
        keep_last(&mut persisted, self.persisted_cap);

        let json = serde_json::to_string(&persisted)
            .map_err(|err| HoursGuardError::Parse(err.to_string()))?;
        self.store.set(ERROR_LOG_KEY, &json)
    }

    fn read_persisted(&self) -> Vec<ErrorRecord> {
        match self.store.get(ERROR_LOG_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                debug!(error = %err, "persisted error log unreadable, starting fresh");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                debug!(error = %err, "persisted error log unavailable");
                Vec::new()
            }
        }
    }
}

/// File name used by [`ErrorLogStore::export`]
pub fn export_filename(today: NaiveDate) -> String {
    format!("{ERROR_EXPORT_PREFIX}-{}.json", today.format("%Y-%m-%d"))
}
