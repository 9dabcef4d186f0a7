//! Error log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the error log.
///
/// Immutable once created. The persisted JSON uses camelCase keys
/// (`userAgent`) and an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    /// May be empty
    #[serde(default)]
    pub stack: String,
    pub context: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub url: String,
}

impl ErrorRecord {
    /// Whether the record falls within `[since, now]`
    pub fn is_since(&self, since: DateTime<Utc>) -> bool {
        self.timestamp >= since
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn persisted_shape_uses_camel_case() {
        let record = ErrorRecord {
            message: "boom".into(),
            stack: String::new(),
            context: "records.load".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            user_agent: "hoursguard/0.1.0".into(),
            url: "file://hoursguard".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["userAgent"], "hoursguard/0.1.0");
        assert_eq!(value["timestamp"], "2026-02-01T12:00:00Z");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{"message":"m","context":"c","timestamp":"2026-02-01T12:00:00Z"}"#;
        let record: ErrorRecord = serde_json::from_str(json).unwrap();
        assert!(record.stack.is_empty());
        assert!(record.user_agent.is_empty());
    }
}
