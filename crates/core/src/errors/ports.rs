//! Port interfaces for failure handling
//!
//! These traits define the boundaries between the error handler and the
//! platform it runs on: persistence, user notification, localization, file
//! downloads and environment probing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use hoursguard_domain::{NetworkInfo, NotifySeverity, Result, SystemInfo};

/// String-keyed, string-valued persistent storage
///
/// Writes fail with `HoursGuardError::Storage` when the backend refuses them
/// (quota exceeded, disk unavailable).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Enumerate every stored key
    fn keys(&self) -> Result<Vec<String>>;

    /// Remove `key` from every backend this store fronts.
    ///
    /// A plain store has a single backend, so this is `remove`.
    fn purge(&self, key: &str) -> Result<()> {
        self.remove(key)
    }
}

/// Trait for showing transient user-facing messages
///
/// Implementations must return immediately; rendering and dismissal happen
/// in the background. Concurrent calls stack, nothing is deduplicated.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, severity: NotifySeverity);
}

/// Message catalog lookup
pub trait Localizer: Send + Sync {
    /// Translate `key`; unknown keys come back unchanged
    fn translate(&self, key: &str) -> String;
}

/// Client-side file download primitive
pub trait FileDownloader: Send + Sync {
    fn download(&self, filename: &str, mime: &str, content: &str) -> Result<()>;
}

/// Environment facts for the diagnostics report
#[async_trait]
pub trait EnvironmentProbe: Send + Sync {
    /// Static host facts; `capabilities` may be left empty
    fn system_info(&self) -> SystemInfo;

    /// Probe connectivity, bounded by the probe's own timeout
    async fn network_info(&self) -> NetworkInfo;

    /// Capability name → present
    fn capabilities(&self) -> BTreeMap<String, bool>;
}
