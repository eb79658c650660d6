//! Session Cost Analysis Engine
//!
//! [`SessionCostAnalyzer`] coordinates the full pipeline: discover (or
//! accept) session log paths, analyze each file into a summary, apply the
//! time-window and provider filters, group by model key, and hand the result
//! to the selected formatter.
//!
//! The engine itself is synchronous and single-threaded; each log is fully
//! analyzed before grouping begins. It performs no network I/O, and
//! [`SessionCostAnalyzer::analyze_files`] consumes an already-enumerated list
//! of paths so callers can inject their own enumeration.

use crate::aggregate::group_by_model;
use crate::display::DisplayManager;
use crate::file_discovery::FileDiscovery;
use crate::filter::{cutoff_from_offset, within_window};
use crate::models::SessionSummary;
use crate::parser::SessionAnalyzer;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable report
    Json,
    /// Chat-digest message
    Discord,
}

/// One invocation's configuration surface.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory to scan for session logs.
    pub path: PathBuf,
    /// Compact time-window expression (`30m`, `2h`, `7d`).
    pub offset: Option<String>,
    /// Case-insensitive provider filter.
    pub provider: Option<String>,
    pub format: OutputFormat,
    /// Show per-session detail blocks.
    pub details: bool,
    /// Scope to exactly one session: `<id>.jsonl` under `path`.
    pub session: Option<String>,
    /// Compact table layout for details.
    pub table: bool,
}

pub struct SessionCostAnalyzer {
    discovery: FileDiscovery,
    analyzer: SessionAnalyzer,
    display: DisplayManager,
}

impl Default for SessionCostAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCostAnalyzer {
    pub fn new() -> Self {
        Self {
            discovery: FileDiscovery::new(),
            analyzer: SessionAnalyzer::new(),
            display: DisplayManager::new(),
        }
    }

    /// Analyze an enumerated list of session logs, dropping summaries the
    /// time window rejects. A file that cannot be read is a hard error.
    pub fn analyze_files(
        &self,
        files: &[PathBuf],
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Vec<SessionSummary>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            let summary = self.analyzer.analyze_file(file)?;
            if within_window(&summary, cutoff) {
                results.push(summary);
            } else {
                debug!(file = %file.display(), "Session rejected by time window");
            }
        }
        Ok(results)
    }

    pub fn run(&self, options: RunOptions) -> Result<()> {
        if !options.path.exists() {
            anyhow::bail!("Path does not exist: {}", options.path.display());
        }

        let cutoff = match options.offset.as_deref() {
            Some(expr) => Some(cutoff_from_offset(expr, Utc::now())?),
            None => None,
        };

        if let Some(id) = options.session.clone() {
            return self.run_single_session(&options, &id, cutoff);
        }

        let files = self.discovery.find_jsonl_files(&options.path)?;
        let mut results = self.analyze_files(&files, cutoff)?;

        if results.is_empty() {
            warn!(path = %options.path.display(), "No sessions matched the criteria");
            match options.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({"models": {}, "sessions": 0}))
                }
                _ => println!("No sessions matched the criteria."),
            }
            return Ok(());
        }

        if let Some(provider) = &options.provider {
            let found = results.len();
            let wanted = provider.to_lowercase();
            results.retain(|r| r.provider.to_lowercase() == wanted);
            if results.is_empty() && options.format != OutputFormat::Json {
                println!("No sessions matched provider filter: {}", provider);
                println!(
                    "(Found {} sessions total, but none matched the provider)",
                    found
                );
                return Ok(());
            }
        }

        // Newest first, undated sessions last.
        results.sort_by(|a, b| {
            let a_time = a.last_timestamp.or(a.first_timestamp);
            let b_time = b.last_timestamp.or(b.first_timestamp);
            b_time.cmp(&a_time)
        });

        let groups = group_by_model(&results);

        match options.format {
            OutputFormat::Json => {
                let report =
                    self.display
                        .build_report(&results, &groups, options.offset.as_deref());
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Discord => {
                println!(
                    "{}",
                    self.display
                        .build_digest(&results, &groups, options.offset.as_deref())
                );
            }
            OutputFormat::Text => {
                let mut filters = Vec::new();
                if let (Some(offset), Some(cutoff)) = (options.offset.as_deref(), cutoff) {
                    filters.push(format!(
                        "sessions from the last {} (since {})",
                        offset,
                        cutoff.to_rfc3339()
                    ));
                }
                if let Some(provider) = &options.provider {
                    filters.push(format!("provider={}", provider));
                }
                if !filters.is_empty() {
                    println!("Filtering: {}\n", filters.join(", "));
                }
                println!(
                    "Found {} .jsonl files, {} matched\n",
                    files.len(),
                    results.len()
                );

                if options.details {
                    self.display.display_details(&results, options.table);
                }
                self.display.display_summary(&results, &groups);
            }
        }

        Ok(())
    }

    /// `--details <id>`: analyze exactly one session log, `<id>.jsonl` under
    /// the scan root. A missing session file is a configuration error.
    fn run_single_session(
        &self,
        options: &RunOptions,
        id: &str,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let session_file = options.path.join(format!("{}.jsonl", id));
        if !session_file.exists() {
            anyhow::bail!("Session file not found: {}", session_file.display());
        }

        let summary = self.analyzer.analyze_file(&session_file)?;
        if !within_window(&summary, cutoff) {
            println!("Session did not match the time criteria.");
            return Ok(());
        }

        match options.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            _ => self.display.print_session_detail(&summary),
        }

        Ok(())
    }
}
