//! Command execution helpers
//!
//! Time a command, log its outcome and hand the result back unchanged.

use std::future::Future;
use std::time::Instant;

use hoursguard_domain::Result;

use crate::utils::logging::log_command_execution;

/// Run a synchronous command with execution logging
pub fn execute_logged<T>(command_name: &str, command_fn: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = command_fn();
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(|e| e.label()));
    result
}

/// Run an async command with execution logging
pub async fn execute_logged_async<F, Fut, T>(command_name: &str, command_fn: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(|e| e.label()));
    result
}
