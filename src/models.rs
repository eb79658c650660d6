//! Core Data Models
//!
//! This module defines the primary data structures used throughout the session
//! cost analysis pipeline.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: raw record shapes in [`crate::parser`] decode individual
//!    JSONL lines
//! 2. **Aggregation**: [`SessionSummary`] - one summary per session log file
//! 3. **Output**: [`UsageReport`] / [`ModelReport`] - serializable totals for
//!    the machine-readable report
//!
//! ## Core Types
//!
//! - [`Usage`] - Token and cost counters accumulated over a session. Token
//!   counts and cost categories are summed independently; `cost_total` is
//!   carried verbatim from the source records and is never reconstructed from
//!   the category fields, since upstream totals may include adjustments not
//!   broken out per category.
//! - [`SessionSummary`] - Identity fields, usage aggregate and timestamp
//!   bounds for one session log. Identity strings default to `"unknown"`.
//! - [`ModelReport`] / [`UsageReport`] - Per-model totals keyed by
//!   `provider/model`, with a grand total entry only when more than one model
//!   key is present.
//!
//! All public types support serde serialization with camelCase field names to
//! stay wire-compatible with the log producer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Token and cost counters for one session or one aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usage {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub total_tokens: u64,
    pub cost_input: f64,
    pub cost_output: f64,
    pub cost_cache_read: f64,
    pub cost_cache_write: f64,
    pub cost_total: f64,
}

impl Usage {
    /// Element-wise accumulation. Every field is summed independently,
    /// including `cost_total`.
    pub fn add(&mut self, other: &Usage) {
        self.input += other.input;
        self.output += other.output;
        self.cache_read += other.cache_read;
        self.cache_write += other.cache_write;
        self.total_tokens += other.total_tokens;
        self.cost_input += other.cost_input;
        self.cost_output += other.cost_output;
        self.cost_cache_read += other.cost_cache_read;
        self.cost_cache_write += other.cost_cache_write;
        self.cost_total += other.cost_total;
    }
}

/// One session log file, fully analyzed. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Base name of the log file.
    pub file: String,
    /// Full path the summary was read from.
    pub full_path: PathBuf,
    pub session_id: Option<String>,
    pub api: String,
    pub provider: String,
    pub model: String,
    pub usage: Usage,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Minutes between the first and last timestamp, 0 if either is absent.
    pub duration_min: i64,
}

impl SessionSummary {
    /// Grouping key: `provider/model`, case-sensitive, no normalization.
    pub fn model_key(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTotals {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheTotals {
    pub read: u64,
    pub write: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub total: f64,
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
}

/// Totals for one model key (or for the grand total entry). Costs are
/// rounded to 4 decimal places at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub sessions: usize,
    pub tokens: TokenTotals,
    pub cache: CacheTotals,
    pub cost: CostTotals,
}

impl ModelReport {
    pub fn from_totals(sessions: usize, totals: &Usage) -> Self {
        Self {
            sessions,
            tokens: TokenTotals {
                input: totals.input,
                output: totals.output,
                total: totals.total_tokens,
            },
            cache: CacheTotals {
                read: totals.cache_read,
                write: totals.cache_write,
            },
            cost: CostTotals {
                total: round4(totals.cost_total),
                input: round4(totals.cost_input),
                output: round4(totals.cost_output),
                cache_read: round4(totals.cost_cache_read),
                cache_write: round4(totals.cost_cache_write),
            },
        }
    }
}

/// Machine-readable report: per-model totals plus an optional grand total
/// (present only when more than one model key exists) and the echoed time
/// window, if one was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub models: BTreeMap<String, ModelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<ModelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// Round a currency amount to 4 decimal places for rendering.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
