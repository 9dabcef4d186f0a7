//! Process-wide failure hooks
//!
//! Kept in their own test binary: the panic hook is process-global.

mod support;

use std::sync::Arc;

use hoursguard_domain::{HoursGuardError, Result};
use hoursguard_lib::hooks::{self, PANIC_CONTEXT};
use support::create_test_app;

async fn explode() -> Result<()> {
    panic!("task exploded")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_panics_and_failed_tasks_reach_the_error_log() {
    let app = create_test_app();
    let handler = Arc::clone(&app.ctx.handler);

    // failed supervised task
    hooks::spawn_supervised(Arc::clone(&handler), "sync", async {
        Err(HoursGuardError::Network("fetch failed".into()))
    })
    .await
    .unwrap();

    // successful supervised task leaves no trace
    hooks::spawn_supervised(Arc::clone(&handler), "sync", async { Ok(()) }).await.unwrap();

    let log = handler.error_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].context, "sync");

    // panic on a plain thread goes through the hook exactly once
    hooks::install_panic_hook(Arc::clone(&handler));
    let joined = std::thread::spawn(|| panic!("worker exploded")).join();
    hooks::remove_panic_hook();

    assert!(joined.is_err());
    let log = handler.error_log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].context, PANIC_CONTEXT);
    assert_eq!(log[1].message, "worker exploded");
    assert!(log[1].stack.contains("failure_hooks.rs"));

    // panic inside a supervised task is reported by the hook, not twice
    hooks::install_panic_hook(Arc::clone(&handler));
    hooks::spawn_supervised(Arc::clone(&handler), "background", explode()).await.unwrap();
    hooks::remove_panic_hook();

    let log = handler.error_log();
    assert_eq!(log.len(), 3);
    assert_eq!(log[2].message, "task exploded");
    assert_eq!(log[2].context, PANIC_CONTEXT);
}
