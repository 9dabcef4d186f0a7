//! Transient toast notifications
//!
//! Each call to [`Notifier::show`] adds a toast to a shared surface and spawns
//! a task that walks it through its lifecycle:
//!
//! ```text
//! Inserted --show_delay--> Visible --visible--> Fading --fade--> removed
//! ```
//!
//! Toasts stack in insertion order and are never deduplicated. Lifecycle
//! tasks stop when the notifier is shut down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hoursguard_core::Notifier;
use hoursguard_domain::{NotifierConfig, NotifySeverity};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where a toast is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    /// On the surface, not yet shown
    Inserted,
    Visible,
    /// Fading out, removed once the fade completes
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: NotifySeverity,
    pub phase: ToastPhase,
}

type Surface = Arc<Mutex<Vec<Toast>>>;

/// Notifier rendering toasts onto an in-process surface
#[derive(Debug)]
pub struct ToastNotifier {
    config: NotifierConfig,
    surface: Surface,
    next_id: AtomicU64,
    cancel: CancellationToken,
}

impl ToastNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            surface: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Toasts currently on the surface, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.surface.lock().clone()
    }

    /// Stop every lifecycle task and empty the surface
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.surface.lock().clear();
        debug!("toast notifier shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn spawn_lifecycle(&self, handle: &Handle, id: u64) {
        let surface = Arc::clone(&self.surface);
        let cancel = self.cancel.clone();
        let show_delay = Duration::from_millis(self.config.show_delay_ms);
        let visible = Duration::from_millis(self.config.visible_ms);
        let fade = Duration::from_millis(self.config.fade_ms);

        handle.spawn(async move {
            let steps = [
                (show_delay, Some(ToastPhase::Visible)),
                (visible, Some(ToastPhase::Fading)),
                (fade, None),
            ];

            for (wait, next) in steps {
                tokio::select! {
                    () = cancel.cancelled() => return,
                    () = tokio::time::sleep(wait) => {}
                }

                let mut toasts = surface.lock();
                match next {
                    Some(phase) => {
                        if let Some(toast) = toasts.iter_mut().find(|t| t.id == id) {
                            toast.phase = phase;
                            debug!(toast_id = id, ?phase, "toast phase changed");
                        }
                    }
                    None => {
                        toasts.retain(|t| t.id != id);
                        debug!(toast_id = id, "toast removed");
                    }
                }
            }
        });
    }
}

impl Notifier for ToastNotifier {
    fn show(&self, message: &str, severity: NotifySeverity) {
        info!(target: "hoursguard::toast", %severity, "{message}");

        if self.cancel.is_cancelled() {
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!("no async runtime available, toast not rendered");
            return;
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.surface.lock().push(Toast {
            id,
            message: message.to_string(),
            severity,
            phase: ToastPhase::Inserted,
        });
        self.spawn_lifecycle(&handle, id);
    }
}

impl Drop for ToastNotifier {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_without_runtime_does_not_render() {
        let notifier = ToastNotifier::new(NotifierConfig::default());
        notifier.show("offline", NotifySeverity::Warning);
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_empties_surface_and_ignores_later_calls() {
        let notifier = ToastNotifier::new(NotifierConfig::default());
        notifier.show("first", NotifySeverity::Error);
        assert_eq!(notifier.toasts().len(), 1);

        notifier.shutdown();
        assert!(notifier.toasts().is_empty());
        assert!(notifier.is_shut_down());

        notifier.show("second", NotifySeverity::Error);
        assert!(notifier.toasts().is_empty());
    }
}
