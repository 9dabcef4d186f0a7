//! Process-wide failure hooks
//!
//! Failures nobody handles explicitly still reach the [`ErrorHandler`]:
//! panics through the panic hook, failed background tasks through
//! [`spawn_supervised`].

use std::any::Any;
use std::future::Future;
use std::panic;
use std::sync::Arc;

use hoursguard_core::ErrorHandler;
use hoursguard_domain::{Failure, Result};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Context label for failures captured by the panic hook
pub const PANIC_CONTEXT: &str = "panic";

/// Route every panic to `handler`, then run the previously installed hook.
///
/// The failure is untagged: it is classified from its message alone.
pub fn install_panic_hook(handler: Arc<ErrorHandler>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let mut failure = Failure::new(panic_message(info.payload()));
        if let Some(location) = info.location() {
            failure = failure.with_stack(format!(
                "at {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ));
        }

        handler.handle_error(failure, PANIC_CONTEXT);
        previous(info);
    }));
}

/// Restore the default panic hook
pub fn remove_panic_hook() {
    drop(panic::take_hook());
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Spawn `task` and route its failure to `handler` under `context`.
///
/// Panics inside the task are left to the panic hook so they are reported
/// once. The returned handle resolves when the failure has been handled.
pub fn spawn_supervised<F>(
    handler: Arc<ErrorHandler>,
    context: &'static str,
    task: F,
) -> JoinHandle<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let inner = tokio::spawn(task);
    tokio::spawn(async move {
        match inner.await {
            Ok(Ok(())) => debug!(context, "supervised task finished"),
            Ok(Err(err)) => {
                let outcome = handler.handle_error(&err, context);
                debug!(context, ?outcome, "supervised task failed");
            }
            Err(join_err) if join_err.is_panic() => {
                warn!(context, "supervised task panicked");
            }
            Err(_) => debug!(context, "supervised task cancelled"),
        }
    })
}
