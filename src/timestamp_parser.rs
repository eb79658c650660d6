use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Handles parsing timestamps from the various shapes session logs use
pub struct TimestampParser;

impl TimestampParser {
    /// Parse a timestamp string into a DateTime<Utc>
    /// Handles both Z suffix and timezone info formats
    pub fn parse(timestamp_str: &str) -> Result<DateTime<Utc>> {
        // Handle both Z suffix and timezone info
        let timestamp = if timestamp_str.ends_with('Z') {
            timestamp_str.replace('Z', "+00:00")
        } else {
            timestamp_str.to_string()
        };

        // Try parsing as ISO 8601
        if let Ok(dt) = DateTime::parse_from_rfc3339(&timestamp) {
            return Ok(dt.with_timezone(&Utc));
        }

        // Try parsing as naive datetime and assume UTC
        if let Ok(naive) = NaiveDateTime::parse_from_str(&timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }

        anyhow::bail!("Failed to parse timestamp: {}", timestamp_str)
    }

    /// Parse a raw JSON timestamp value. Strings go through [`Self::parse`];
    /// numbers are treated as epoch milliseconds.
    pub fn parse_value(value: &Value) -> Result<DateTime<Utc>> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => {
                let millis = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {}", n))?;
                DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {}", millis))
            }
            other => anyhow::bail!("Unsupported timestamp value: {}", other),
        }
    }
}
