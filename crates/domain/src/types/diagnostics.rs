//! Health report types
//!
//! A [`DiagnosticsReport`] is computed fresh on every request and never
//! persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    pub storage_info: StorageInfo,
    pub network_info: NetworkInfo,
    pub error_stats: ErrorStats,
    /// Ordered, localized issue descriptions
    pub issues: Vec<String>,
    /// Ordered, localized suggestions matching the issues
    pub suggestions: Vec<String>,
}

impl DiagnosticsReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Host facts and capability checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub family: String,
    pub cpu_count: usize,
    pub user_agent: String,
    pub locale: String,
    /// Capability name → present
    pub capabilities: BTreeMap<String, bool>,
}

impl SystemInfo {
    pub fn missing_capabilities(&self) -> Vec<&str> {
        self.capabilities
            .iter()
            .filter(|(_, present)| !**present)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Key/value storage usage, measured in UTF-16 code units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub used: u64,
    pub available: u64,
    pub total: u64,
    pub key_count: usize,
}

/// Connectivity probe result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// `None` when no probe target is configured
    pub online: Option<bool>,
    pub latency_ms: Option<u64>,
    pub probe_target: Option<String>,
}

/// Error log statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStats {
    /// Records currently in the log
    pub total: usize,
    /// Records stamped within the last 24 hours
    pub last_24h: usize,
    /// Last-24h records grouped by context label
    pub by_context: BTreeMap<String, usize>,
}
