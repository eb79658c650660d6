//! Session Cost Library
//!
//! Analyzes OpenClaw agent session logs (newline-delimited JSON) to report
//! token usage and monetary cost per session, aggregated by model and
//! provider, with optional time-window filtering and multiple output
//! renderings.
//!
//! ## Architecture Overview
//!
//! - [`models`] - Usage counters, per-session summaries and report types
//! - [`parser`] - Record decoding and per-file session analysis
//! - [`filter`] - Offset expressions and the time-window predicate
//! - [`aggregate`] - Usage reduction and model/provider grouping
//! - [`analyzer`] - Pipeline orchestration
//! - [`display`] - Text, JSON and digest formatters
//! - [`file_discovery`] - Recursive `.jsonl` discovery under the scan root
//! - [`config`] - Configuration with file and environment overrides
//! - [`logging`] - Structured logging setup
//!
//! ## Main Entry Point
//!
//! The primary interface is [`SessionCostAnalyzer`]:
//!
//! ```rust,no_run
//! use session_cost::analyzer::{OutputFormat, RunOptions, SessionCostAnalyzer};
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let analyzer = SessionCostAnalyzer::new();
//! analyzer.run(RunOptions {
//!     path: PathBuf::from("/var/log/openclaw/sessions"),
//!     offset: Some("24h".to_string()),
//!     provider: None,
//!     format: OutputFormat::Text,
//!     details: false,
//!     session: None,
//!     table: false,
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod display;
pub mod file_discovery;
pub mod filter;
pub mod logging;
pub mod models;
pub mod parser;
pub mod timestamp_parser;

pub use analyzer::SessionCostAnalyzer;
pub use models::*;
