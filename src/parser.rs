use crate::models::{SessionSummary, Usage};
use crate::timestamp_parser::TimestampParser;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

// Raw record shapes. Session logs are heterogeneous: every field except the
// line being a JSON object is optional, and unrecognized record types still
// carry timestamps worth keeping.

#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub usage: Option<RawUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUsage {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub total_tokens: u64,
    pub cost: Option<RawCost>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
    pub total: f64,
}

impl RawCost {
    /// A record is billed when its cost total is strictly positive. Zero-cost
    /// records are bookkeeping wrappers and are not trusted to name the
    /// backend that produced them.
    fn is_billed(&self) -> bool {
        self.total > 0.0
    }
}

/// Folds the records of one session log into a [`SessionSummary`].
pub struct SessionAnalyzer;

impl Default for SessionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Read one session log fully and fold every line into a summary.
    ///
    /// A missing or unreadable file is a hard error. A line that fails to
    /// decode as a JSON object is skipped; logs may contain partial writes
    /// and non-JSON noise.
    pub fn analyze_file(&self, path: &Path) -> Result<SessionSummary> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session log: {}", path.display()))?;

        let mut usage = Usage::default();
        let mut session_id: Option<String> = None;
        let mut api: Option<String> = None;
        let mut provider: Option<String> = None;
        let mut model: Option<String> = None;
        let mut first_timestamp: Option<DateTime<Utc>> = None;
        let mut last_timestamp: Option<DateTime<Utc>> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: RawRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(_) => continue,
            };

            // The first session marker wins; later ones never overwrite it.
            if record.record_type.as_deref() == Some("session") && session_id.is_none() {
                session_id = record.id;
            }

            // Every parseable timestamp widens the bounds, whatever the
            // record type.
            if let Some(raw_ts) = &record.timestamp {
                if let Ok(ts) = TimestampParser::parse_value(raw_ts) {
                    first_timestamp = Some(first_timestamp.map_or(ts, |f| f.min(ts)));
                    last_timestamp = Some(last_timestamp.map_or(ts, |l| l.max(ts)));
                }
            }

            if record.record_type.as_deref() != Some("message") {
                continue;
            }
            let Some(message) = record.message else {
                continue;
            };
            let Some(entry) = message.usage else {
                continue;
            };

            // Token accounting is cumulative across every message record,
            // billed or not.
            usage.input += entry.input;
            usage.output += entry.output;
            usage.cache_read += entry.cache_read;
            usage.cache_write += entry.cache_write;
            usage.total_tokens += entry.total_tokens;

            if let Some(cost) = &entry.cost {
                usage.cost_input += cost.input;
                usage.cost_output += cost.output;
                usage.cost_cache_read += cost.cache_read;
                usage.cost_cache_write += cost.cache_write;
                usage.cost_total += cost.total;

                // Identity follows the last billed call in the session.
                if cost.is_billed() {
                    if message.api.is_some() {
                        api = message.api;
                    }
                    if message.model.is_some() {
                        model = message.model;
                    }
                    if message.provider.is_some() {
                        provider = message.provider;
                    }
                }
            }
        }

        let duration_min = match (first_timestamp, last_timestamp) {
            (Some(first), Some(last)) => {
                ((last - first).num_seconds() as f64 / 60.0).round() as i64
            }
            _ => 0,
        };

        Ok(SessionSummary {
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            full_path: path.to_path_buf(),
            session_id,
            api: api.unwrap_or_else(|| "unknown".to_string()),
            provider: provider.unwrap_or_else(|| "unknown".to_string()),
            model: model.unwrap_or_else(|| "unknown".to_string()),
            usage,
            first_timestamp,
            last_timestamp,
            duration_min,
        })
    }
}
