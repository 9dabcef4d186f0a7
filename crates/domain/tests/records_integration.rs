//! Integration tests for persisted domain shapes
//!
//! The error log and the work-record set are stored as JSON arrays; these
//! tests pin the shapes other components read back.

use chrono::{TimeZone, Utc};
use hoursguard_domain::{
    ClockKind, ClockRecord, Config, DiagnosticsReport, ErrorRecord, ErrorStats, NetworkInfo,
    StorageInfo, SystemInfo,
};

// ============================================================================
// Error log
// ============================================================================

#[test]
fn test_error_log_array_round_trips() {
    let records: Vec<ErrorRecord> = (0..3)
        .map(|i| ErrorRecord {
            message: format!("failure {i}"),
            stack: String::new(),
            context: "storage".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, i, 0).unwrap(),
            user_agent: "hoursguard/test".into(),
            url: "file://hoursguard".into(),
        })
        .collect();

    let json = serde_json::to_string(&records).unwrap();
    let parsed: Vec<ErrorRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, records);
    assert!(json.contains("\"userAgent\""));
}

// ============================================================================
// Work records
// ============================================================================

#[test]
fn test_work_record_set_preserves_order() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap();
    let set = vec![
        ClockRecord::new(ClockKind::In, start, Some("standup".into())),
        ClockRecord::new(ClockKind::Out, start + chrono::Duration::hours(8), None),
    ];

    let json = serde_json::to_string(&set).unwrap();
    let parsed: Vec<ClockRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0].kind, ClockKind::In);
    assert_eq!(parsed[0].note.as_deref(), Some("standup"));
    assert_eq!(parsed[1].kind, ClockKind::Out);
    assert_ne!(parsed[0].id, parsed[1].id);
}

#[test]
fn test_corrupted_record_set_is_a_parse_error() {
    let result: Result<Vec<ClockRecord>, _> = serde_json::from_str("[{\"id\":");
    assert!(result.unwrap_err().is_eof());
}

// ============================================================================
// Diagnostics and config
// ============================================================================

#[test]
fn test_report_serializes_camel_case_sections() {
    let report = DiagnosticsReport {
        timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap(),
        system_info: SystemInfo::default(),
        storage_info: StorageInfo { used: 10, available: 90, total: 100, key_count: 1 },
        network_info: NetworkInfo::default(),
        error_stats: ErrorStats::default(),
        issues: Vec::new(),
        suggestions: Vec::new(),
    };

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["storageInfo"]["keyCount"], 1);
    assert!(value["networkInfo"]["online"].is_null());
    assert!(report.is_healthy());
}

#[test]
fn test_default_config_matches_documented_limits() {
    let config = Config::default();
    assert_eq!(config.error_log.memory_cap, 100);
    assert_eq!(config.error_log.memory_retain, 50);
    assert_eq!(config.error_log.persisted_cap, 50);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay_ms, 1000);
    assert_eq!(config.notifier.show_delay_ms, 100);
    assert_eq!(config.diagnostics.storage_budget_bytes, 5 * 1024 * 1024);
}
