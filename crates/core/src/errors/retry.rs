//! Retry with user notifications
//!
//! Wraps the generic [`RetryExecutor`] with linear backoff and tells the user
//! when a retried operation eventually succeeds or when every attempt has
//! failed. Nothing here touches the error log.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hoursguard_common::{
    duration_ms, BackoffStrategy, RetryConfig, RetryError, RetryExecutor,
};
use hoursguard_domain::constants::message_keys;
use hoursguard_domain::NotifySeverity;
use tracing::{debug, instrument};

use super::ports::{Localizer, Notifier};

/// Placeholder replaced by the attempt count in retry messages
pub const ATTEMPTS_PLACEHOLDER: &str = "{attempts}";

/// Retry executor that reports its outcome through the notifier
pub struct NotifyingRetryExecutor {
    base_delay: Duration,
    notifier: Arc<dyn Notifier>,
    localizer: Arc<dyn Localizer>,
}

impl NotifyingRetryExecutor {
    /// `base_delay` is multiplied by the failed attempt number before each
    /// retry: with 1s the waits are 1s, 2s, 3s...
    pub fn new(
        base_delay: Duration,
        notifier: Arc<dyn Notifier>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self { base_delay, notifier, localizer }
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Run `operation` up to `max_attempts` times.
    ///
    /// Returns the first success, or the last failure inside
    /// [`RetryError::AttemptsExhausted`]. `max_attempts == 0` is rejected
    /// without invoking the operation.
    #[instrument(skip(self, operation))]
    pub async fn execute<F, Fut, T, E>(
        &self,
        operation: F,
        max_attempts: u32,
    ) -> Result<T, RetryError<E>>
    where
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let executor = RetryExecutor::new(RetryConfig {
            max_attempts,
            backoff: BackoffStrategy::linear_multiple(self.base_delay),
        });

        let outcome = executor.execute_with_outcome(operation).await;
        debug!(
            attempts = outcome.attempts,
            total_delay_ms = duration_ms(outcome.total_delay),
            "retry sequence finished"
        );

        match &outcome.result {
            Ok(_) if outcome.recovered() => {
                let attempts = outcome.attempts;
                self.announce(message_keys::RETRY_SUCCEEDED, attempts, NotifySeverity::Success);
            }
            Err(RetryError::AttemptsExhausted { attempts, .. }) => {
                self.announce(message_keys::RETRY_EXHAUSTED, *attempts, NotifySeverity::Error);
            }
            _ => {}
        }

        outcome.into_result()
    }

    fn announce(&self, key: &str, attempts: u32, severity: NotifySeverity) {
        let message = with_attempts(self.localizer.translate(key), attempts);
        self.notifier.show(&message, severity);
    }
}

/// Embed the attempt count in a localized template.
///
/// Templates without the placeholder get the count appended.
pub fn with_attempts(template: String, attempts: u32) -> String {
    if template.contains(ATTEMPTS_PLACEHOLDER) {
        template.replace(ATTEMPTS_PLACEHOLDER, &attempts.to_string())
    } else {
        format!("{template} ({attempts})")
    }
}
