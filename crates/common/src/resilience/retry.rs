//! Attempt loop with backoff
//!
//! Re-invokes a fallible async operation until it succeeds or the attempt
//! budget is spent, sleeping between attempts according to a
//! [`BackoffStrategy`]. The final failure is handed back unchanged inside
//! [`RetryError::AttemptsExhausted`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::time::duration_ms;

#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; carries the last failure
    #[error("All retry attempts exhausted after {attempts} tries")]
    AttemptsExhausted { attempts: u32, last_error: E },

    #[error("Invalid retry configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Result of a retry sequence plus what it cost
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: RetryResult<T, E>,
    /// Times the operation was invoked
    pub attempts: u32,
    /// Sum of the waits between attempts
    pub total_delay: Duration,
}

impl<T, E> RetryOutcome<T, E> {
    pub fn into_result(self) -> RetryResult<T, E> {
        self.result
    }

    /// Succeeded, but not on the first attempt
    pub fn recovered(&self) -> bool {
        self.result.is_ok() && self.attempts > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    Fixed(Duration),
    /// `initial_delay + retry_index * increment`
    Linear { initial_delay: Duration, increment: Duration },
}

impl BackoffStrategy {
    /// Wait `base * k` after failed attempt `k` (1-based)
    pub fn linear_multiple(base: Duration) -> Self {
        Self::Linear { initial_delay: base, increment: base }
    }

    /// Delay before the retry with zero-based index `retry_index`
    pub fn calculate_delay(&self, retry_index: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Linear { initial_delay, increment } => {
                initial_delay.saturating_add(increment.saturating_mul(retry_index))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts including the first one
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffStrategy::linear_multiple(Duration::from_millis(1000)),
        }
    }
}

impl RetryConfig {
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RetryError<()>> {
        if self.max_attempts == 0 {
            return Err(zero_attempts());
        }
        Ok(())
    }
}

fn zero_attempts<E>() -> RetryError<E> {
    RetryError::InvalidConfiguration { message: "max_attempts must be greater than 0".to_string() }
}

#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn fixed_backoff(mut self, delay: Duration) -> Self {
        self.config.backoff = BackoffStrategy::Fixed(delay);
        self
    }

    pub fn linear_backoff(mut self, initial_delay: Duration, increment: Duration) -> Self {
        self.config.backoff = BackoffStrategy::Linear { initial_delay, increment };
        self
    }

    pub fn build(self) -> Result<RetryConfig, RetryError<()>> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> RetryResult<T, E>
    where
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with_outcome(operation).await.into_result()
    }

    /// Run the attempt loop and report attempts and total delay.
    ///
    /// A zero attempt budget fails with `InvalidConfiguration` without
    /// invoking `operation`.
    #[instrument(skip(self, operation), fields(max_attempts = self.config.max_attempts))]
    pub async fn execute_with_outcome<F, Fut, T, E>(&self, mut operation: F) -> RetryOutcome<T, E>
    where
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.config.max_attempts;
        let mut total_delay = Duration::ZERO;

        if max_attempts == 0 {
            return RetryOutcome { result: Err(zero_attempts()), attempts: 0, total_delay };
        }

        let mut attempt = 1;
        loop {
            debug!(attempt, max_attempts, "invoking operation");

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "operation recovered");
                    }
                    return RetryOutcome { result: Ok(value), attempts: attempt, total_delay };
                }
                Err(error) if attempt >= max_attempts => {
                    warn!(attempts = attempt, error = %error, "retry attempts exhausted");
                    return RetryOutcome {
                        result: Err(RetryError::AttemptsExhausted {
                            attempts: attempt,
                            last_error: error,
                        }),
                        attempts: attempt,
                        total_delay,
                    };
                }
                Err(error) => {
                    let delay = self.config.backoff.calculate_delay(attempt - 1);
                    warn!(
                        attempt,
                        error = %error,
                        delay_ms = duration_ms(delay),
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    total_delay += delay;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Backoff math, config validation and the attempt loop under tokio's
    //! paused clock.

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_backoff_strategy_fixed() {
        let strategy = BackoffStrategy::Fixed(Duration::from_millis(100));

        assert_eq!(strategy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(strategy.calculate_delay(5), Duration::from_millis(100));
    }

    #[test]
    fn test_backoff_strategy_linear_multiple() {
        let strategy = BackoffStrategy::linear_multiple(Duration::from_millis(1000));

        assert_eq!(strategy.calculate_delay(0), Duration::from_millis(1000));
        assert_eq!(strategy.calculate_delay(1), Duration::from_millis(2000));
        assert_eq!(strategy.calculate_delay(2), Duration::from_millis(3000));
    }

    #[test]
    fn test_builder_rejects_zero_attempts() {
        let err = RetryConfig::builder().max_attempts(0).build().unwrap_err();
        assert!(matches!(err, RetryError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_sets_linear_schedule() {
        let config = RetryConfig::builder()
            .max_attempts(5)
            .linear_backoff(Duration::from_millis(200), Duration::from_millis(50))
            .build()
            .unwrap();

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff.calculate_delay(2), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_executor_recovers_and_counts_attempts() {
        let executor = RetryExecutor::default();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let start = tokio::time::Instant::now();
        let outcome = executor
            .execute_with_outcome(move || {
                let calls = Arc::clone(&calls_clone);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("transient")
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert!(outcome.recovered());
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.total_delay, Duration::from_millis(3000));
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        assert_eq!(outcome.result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_executor_returns_last_error_when_exhausted() {
        let executor = RetryExecutor::new(RetryConfig {
            max_attempts: 2,
            backoff: BackoffStrategy::Fixed(Duration::from_millis(5)),
        });
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let err = executor
            .execute(move || {
                let calls = Arc::clone(&calls_clone);
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err::<(), _>(format!("failure #{n}"))
                }
            })
            .await
            .unwrap_err();

        match err {
            RetryError::AttemptsExhausted { attempts, last_error } => {
                assert_eq!(attempts, 2);
                assert_eq!(last_error, "failure #2");
            }
            other => panic!("expected AttemptsExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_attempts_never_invokes_operation() {
        let executor = RetryExecutor::new(RetryConfig {
            max_attempts: 0,
            backoff: BackoffStrategy::Fixed(Duration::ZERO),
        });
        let calls = AtomicU32::new(0);

        let outcome = executor
            .execute_with_outcome(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(()) }
            })
            .await;

        assert_eq!(outcome.attempts, 0);
        assert!(matches!(outcome.result, Err(RetryError::InvalidConfiguration { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
