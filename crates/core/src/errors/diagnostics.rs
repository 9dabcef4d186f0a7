//! Health diagnostics
//!
//! Builds a [`DiagnosticsReport`] from storage usage, recent error history
//! and environment probes. Purely observational: nothing is written and no
//! notification is shown.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use hoursguard_common::Clock;
use hoursguard_domain::constants::{message_keys, CAPABILITY_PERSISTENT_STORAGE};
use hoursguard_domain::{
    DiagnosticsConfig, DiagnosticsReport, ErrorRecord, ErrorStats, Result, StorageInfo,
};
use tracing::{debug, instrument, warn};

use super::log::ErrorLogStore;
use super::ports::{EnvironmentProbe, KeyValueStore, Localizer};

pub struct DiagnosticsReporter {
    store: Arc<dyn KeyValueStore>,
    log: Arc<ErrorLogStore>,
    probe: Arc<dyn EnvironmentProbe>,
    localizer: Arc<dyn Localizer>,
    clock: Arc<dyn Clock>,
    config: DiagnosticsConfig,
}

impl DiagnosticsReporter {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        log: Arc<ErrorLogStore>,
        probe: Arc<dyn EnvironmentProbe>,
        localizer: Arc<dyn Localizer>,
        clock: Arc<dyn Clock>,
        config: DiagnosticsConfig,
    ) -> Self {
        Self { store, log, probe, localizer, clock, config }
    }

    /// Compute a fresh report
    #[instrument(skip(self))]
    pub async fn produce(&self) -> DiagnosticsReport {
        let now = self.clock.now();

        let mut system_info = self.probe.system_info();
        system_info.capabilities.extend(self.probe.capabilities());

        let storage_info = match self.storage_usage() {
            Ok(info) => info,
            Err(err) => {
                warn!(error = %err, "storage keys could not be enumerated");
                system_info.capabilities.insert(CAPABILITY_PERSISTENT_STORAGE.to_string(), false);
                self.usage_from(0, 0)
            }
        };

        let network_info = self.probe.network_info().await;
        let error_stats = error_stats(&self.log.snapshot(), now);

        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        if storage_info.available < self.config.low_storage_threshold_bytes {
            issues.push(self.localizer.translate(message_keys::ISSUE_LOW_STORAGE));
            suggestions.push(self.localizer.translate(message_keys::SUGGEST_CLEANUP));
        }

        if error_stats.last_24h > self.config.error_rate_threshold {
            issues.push(self.localizer.translate(message_keys::ISSUE_ERROR_RATE));
            suggestions.push(self.localizer.translate(message_keys::SUGGEST_RELOAD));
        }

        let missing = system_info.missing_capabilities();
        if !missing.is_empty() {
            debug!(?missing, "runtime capabilities missing");
            issues.push(self.localizer.translate(message_keys::ISSUE_OUTDATED_RUNTIME));
            suggestions.push(self.localizer.translate(message_keys::SUGGEST_UPGRADE));
        }

        DiagnosticsReport {
            timestamp: now,
            system_info,
            storage_info,
            network_info,
            error_stats,
            issues,
            suggestions,
        }
    }

    /// Sum of key and value lengths over every stored key
    fn storage_usage(&self) -> Result<StorageInfo> {
        let keys = self.store.keys()?;
        let used = keys
            .iter()
            .map(|key| {
                let value_len = match self.store.get(key) {
                    Ok(value) => value.as_deref().map_or(0, utf16_len),
                    Err(err) => {
                        debug!(key = %key, error = %err, "skipping unreadable key");
                        0
                    }
                };
                utf16_len(key) + value_len
            })
            .sum();

        Ok(self.usage_from(used, keys.len()))
    }

    fn usage_from(&self, used: u64, key_count: usize) -> StorageInfo {
        let total = self.config.storage_budget_bytes;
        StorageInfo { used, available: total.saturating_sub(used), total, key_count }
    }
}

/// Length in UTF-16 code units
pub fn utf16_len(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

/// Records from the last 24 hours, grouped by context
pub fn error_stats(records: &[ErrorRecord], now: DateTime<Utc>) -> ErrorStats {
    let since = now - Duration::hours(24);
    let mut by_context = BTreeMap::new();
    let mut last_24h = 0;

    for record in records.iter().filter(|record| record.is_since(since)) {
        last_24h += 1;
        *by_context.entry(record.context.clone()).or_insert(0) += 1;
    }

    ErrorStats { total: records.len(), last_24h, by_context }
}
