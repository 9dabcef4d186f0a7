//! Error handling service - classification, recovery and reporting
//!
//! [`ErrorHandler`] is the single entry point for failures. It is built once
//! at startup and shared; it owns the error log and the diagnostics reporter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hoursguard_common::{Clock, ErrorSeverity, RetryError};
use hoursguard_domain::constants::{message_keys, RECORDS_BACKUP_KEY, RECORDS_KEY};
use hoursguard_domain::{
    Config, DiagnosticsReport, EnvironmentConfig, ErrorRecord, Failure, HoursGuardError,
    NotifySeverity, Result, WorkDuration,
};
use tracing::{error, info, instrument, warn};

use super::classifier::{ErrorClassifier, FallbackAction, Strategy};
use super::diagnostics::DiagnosticsReporter;
use super::log::ErrorLogStore;
use super::ports::{EnvironmentProbe, FileDownloader, KeyValueStore, Localizer, Notifier};
use super::retry::NotifyingRetryExecutor;
use crate::storage::StorageHandle;

/// Substitute produced by a fallback routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackValue {
    /// Storage now runs in memory; `newly` is false if it already did
    StorageSwitched { newly: bool },
    /// Corrupted records were reset; `backed_up` is false when there was
    /// nothing to back up or the backup write failed
    RecordsReset { backed_up: bool },
    ZeroDuration(WorkDuration),
}

/// What [`ErrorHandler::handle_error`] did with a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    Recovered(FallbackValue),
    Notified,
    Silenced,
    /// The failure is worth retrying; the caller owns the operation
    RetryAdvised { max_attempts: u32 },
}

/// Platform services the handler needs
pub struct ErrorHandlerPorts {
    pub storage: Arc<StorageHandle>,
    pub notifier: Arc<dyn Notifier>,
    pub localizer: Arc<dyn Localizer>,
    pub downloader: Arc<dyn FileDownloader>,
    pub probe: Arc<dyn EnvironmentProbe>,
    pub clock: Arc<dyn Clock>,
}

pub struct ErrorHandler {
    classifier: ErrorClassifier,
    retry: NotifyingRetryExecutor,
    log: Arc<ErrorLogStore>,
    diagnostics: DiagnosticsReporter,
    storage: Arc<StorageHandle>,
    notifier: Arc<dyn Notifier>,
    localizer: Arc<dyn Localizer>,
    downloader: Arc<dyn FileDownloader>,
    clock: Arc<dyn Clock>,
    environment: EnvironmentConfig,
    default_attempts: u32,
}

impl ErrorHandler {
    pub fn new(ports: ErrorHandlerPorts, config: &Config) -> Self {
        Self::with_classifier(ports, config, ErrorClassifier::new())
    }

    /// Handler with a caller-extended classifier
    pub fn with_classifier(
        ports: ErrorHandlerPorts,
        config: &Config,
        classifier: ErrorClassifier,
    ) -> Self {
        let ErrorHandlerPorts { storage, notifier, localizer, downloader, probe, clock } = ports;
        let store: Arc<dyn KeyValueStore> = storage.clone();

        let log = Arc::new(ErrorLogStore::new(
            Arc::clone(&store),
            &config.error_log,
            &config.environment,
        ));
        let diagnostics = DiagnosticsReporter::new(
            store,
            Arc::clone(&log),
            probe,
            Arc::clone(&localizer),
            Arc::clone(&clock),
            config.diagnostics.clone(),
        );
        let retry = NotifyingRetryExecutor::new(
            Duration::from_millis(config.retry.base_delay_ms),
            Arc::clone(&notifier),
            Arc::clone(&localizer),
        );

        Self {
            classifier,
            retry,
            log,
            diagnostics,
            storage,
            notifier,
            localizer,
            downloader,
            clock,
            environment: config.environment.clone(),
            default_attempts: config.retry.max_attempts,
        }
    }

    /// Load the persisted error log into memory; returns the record count
    pub fn restore_error_log(&self) -> usize {
        self.log.restore()
    }

    /// Classify `failure`, log it and run the chosen strategy.
    ///
    /// Fallbacks are fully recovered here; notify strategies show one
    /// transient message. The failure itself is never re-raised.
    pub fn handle_error(&self, failure: impl Into<Failure>, context: &str) -> HandleOutcome {
        self.dispatch(failure.into(), context, true)
    }

    /// Run `operation` with linear-backoff retries.
    ///
    /// On exhaustion the last failure is classified and logged, then returned
    /// to the caller unchanged. The exhaustion message is the only banner the
    /// user sees for it.
    #[instrument(skip(self, operation))]
    pub async fn run_with_retry<F, Fut, T>(
        &self,
        operation: F,
        max_attempts: u32,
        context: &str,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.retry.execute(operation, max_attempts).await {
            Ok(value) => Ok(value),
            Err(RetryError::AttemptsExhausted { last_error, .. }) => {
                self.dispatch(Failure::from(&last_error), context, false);
                Err(last_error)
            }
            Err(RetryError::InvalidConfiguration { message }) => {
                Err(HoursGuardError::Config(message))
            }
        }
    }

    /// Attempts used when callers have no preference
    pub fn default_attempts(&self) -> u32 {
        self.default_attempts
    }

    /// Copy of the in-memory error log, oldest first
    pub fn error_log(&self) -> Vec<ErrorRecord> {
        self.log.snapshot()
    }

    pub fn clear_error_log(&self) {
        self.log.clear();
        info!("error log cleared");
    }

    /// Export the error log; returns the downloaded file name
    pub fn export_error_log(&self) -> Result<String> {
        let today = self.clock.now().date_naive();
        self.log.export(self.downloader.as_ref(), today)
    }

    pub async fn system_diagnosis(&self) -> DiagnosticsReport {
        self.diagnostics.produce().await
    }

    /// Storage shared with the rest of the application
    pub fn storage(&self) -> Arc<StorageHandle> {
        Arc::clone(&self.storage)
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    fn dispatch(&self, failure: Failure, context: &str, notify: bool) -> HandleOutcome {
        let strategy = self.classifier.classify(&failure, context);
        trace_failure(&failure, context, &strategy);

        let outcome = match strategy {
            Strategy::Retry { max_attempts } => HandleOutcome::RetryAdvised { max_attempts },
            Strategy::Fallback { action } => {
                HandleOutcome::Recovered(self.run_fallback(action, notify))
            }
            Strategy::Notify { message_key } => {
                if notify {
                    let message = self.localizer.translate(message_key);
                    self.notifier.show(&message, NotifySeverity::from(failure.severity));
                }
                HandleOutcome::Notified
            }
            Strategy::Silent => HandleOutcome::Silenced,
        };

        // Appended after the fallback so a storage switch also covers the log
        self.log.append(self.record_for(failure, context));
        outcome
    }

    fn run_fallback(&self, action: FallbackAction, notify: bool) -> FallbackValue {
        match action {
            FallbackAction::InMemoryStorage => {
                let newly = self.storage.switch_to_memory();
                if newly && notify {
                    self.notify_key(message_keys::STORAGE_FALLBACK, NotifySeverity::Warning);
                }
                FallbackValue::StorageSwitched { newly }
            }
            FallbackAction::ResetCorruptedRecords => {
                let backed_up = self.reset_corrupted_records();
                if notify {
                    self.notify_key(message_keys::RECORDS_RESET, NotifySeverity::Warning);
                }
                FallbackValue::RecordsReset { backed_up }
            }
            FallbackAction::ZeroDuration => FallbackValue::ZeroDuration(WorkDuration::zero()),
        }
    }

    fn reset_corrupted_records(&self) -> bool {
        let backed_up = match self.storage.get(RECORDS_KEY) {
            Ok(Some(raw)) => match self.storage.set(RECORDS_BACKUP_KEY, &raw) {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, "failed to back up corrupted records");
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read corrupted records");
                false
            }
        };

        if let Err(err) = self.storage.set(RECORDS_KEY, "[]") {
            warn!(error = %err, "failed to reset corrupted records");
        }
        backed_up
    }

    fn notify_key(&self, key: &str, severity: NotifySeverity) {
        self.notifier.show(&self.localizer.translate(key), severity);
    }

    fn record_for(&self, failure: Failure, context: &str) -> ErrorRecord {
        ErrorRecord {
            message: failure.message,
            stack: failure.stack.unwrap_or_default(),
            context: context.to_string(),
            timestamp: self.clock.now(),
            user_agent: self.environment.user_agent.clone(),
            url: self.environment.url.clone(),
        }
    }
}

fn trace_failure(failure: &Failure, context: &str, strategy: &Strategy) {
    match failure.severity {
        ErrorSeverity::Info => {
            info!(context, ?strategy, message = %failure.message, "failure handled");
        }
        ErrorSeverity::Warning => {
            warn!(context, ?strategy, message = %failure.message, "failure handled");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(
                context,
                ?strategy,
                severity = %failure.severity,
                message = %failure.message,
                "failure handled"
            );
        }
    }
}
