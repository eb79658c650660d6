//! Output Formatting and Display Management
//!
//! Renders a set of session summaries and their aggregates in three
//! independent forms:
//!
//! - **Text**: per-model blocks with token, cache and cost breakdowns, a
//!   grand total block only when more than one model key exists, and optional
//!   per-session details (verbose blocks or a compact table).
//! - **Structured JSON**: [`UsageReport`] built by [`DisplayManager::build_report`],
//!   costs rounded to 4 decimal places, `grandTotal` present only when more
//!   than one model key exists, the time window echoed when one was applied.
//! - **Digest**: a Discord-style message with 2-decimal cost, human-scaled
//!   tokens, a provider breakdown only when more than one provider exists,
//!   and the top 5 models ranked by descending cost.
//!
//! Human scaling of token counts (`1.5M`, `2.3K`, `42`) is presentational
//! only; nothing scaled ever feeds back into an aggregate.

use crate::aggregate::{group_by_provider, sum_usage};
use crate::models::{ModelReport, SessionSummary, Usage, UsageReport};
use colored::Colorize;
use std::collections::BTreeMap;

/// Scale a token count for human display: `>= 1e6` as `x.xM`, `>= 1e3` as
/// `x.xK`, otherwise the raw integer.
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// Thousands-separated integer, for the text report's token lines.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    /// Per-model summary blocks, plus a grand total only when more than one
    /// model key exists.
    pub fn display_summary(
        &self,
        sessions: &[SessionSummary],
        groups: &[(String, Vec<&SessionSummary>)],
    ) {
        println!("\n{}", "=".repeat(100).bright_cyan());
        println!("{}", "SUMMARY BY MODEL".bright_white().bold());
        println!("{}", "=".repeat(100).bright_cyan());

        for (key, members) in groups {
            self.print_model_block(key, members.len(), &sum_usage(members));
        }

        if groups.len() > 1 {
            let refs: Vec<&SessionSummary> = sessions.iter().collect();
            let grand = sum_usage(&refs);
            println!("\n{}", "=".repeat(100).bright_cyan());
            println!("{}", "GRAND TOTAL".bright_white().bold());
            println!("{}", "=".repeat(100).bright_cyan());
            self.print_model_block(
                &format!("All models ({})", groups.len()),
                sessions.len(),
                &grand,
            );
        }
    }

    fn print_model_block(&self, label: &str, session_count: usize, totals: &Usage) {
        println!("\n{}", label.bright_white().bold());
        println!("{}", "-".repeat(80));
        println!("  Sessions: {}", session_count);
        println!(
            "  Tokens:   {} (input: {}, output: {})",
            format_count(totals.total_tokens),
            format_count(totals.input),
            format_count(totals.output)
        );
        println!(
            "  Cache:    read: {} tokens, write: {} tokens",
            format_count(totals.cache_read),
            format_count(totals.cache_write)
        );
        println!(
            "  Cost:     {}",
            format!("${:.4}", totals.cost_total).bright_green().bold()
        );
        println!("    Input:       ${:.4}", totals.cost_input);
        println!("    Output:      ${:.4}", totals.cost_output);
        println!(
            "    Cache read:  ${:.4}  (included in total, discounted rate)",
            totals.cost_cache_read
        );
        println!(
            "    Cache write: ${:.4}  (included in total)",
            totals.cost_cache_write
        );
    }

    /// Per-session details: verbose blocks, or one compact row per session
    /// in table mode.
    pub fn display_details(&self, sessions: &[SessionSummary], table: bool) {
        println!("{}", "SESSION DETAILS".bright_white().bold());
        println!("{}", "=".repeat(125).bright_cyan());

        if table {
            println!(
                "{:<35}{:<12}{:<14}{:<20}{:<12}{}",
                "Model", "Duration", "Tokens", "Cache", "Cost", "Session"
            );
            println!("{}", "─".repeat(125));
            for session in sessions {
                self.print_table_row(session);
            }
        } else {
            for session in sessions {
                println!();
                self.print_session_detail(session);
            }
        }
    }

    fn print_table_row(&self, session: &SessionSummary) {
        let model = session.model_key();
        let session_id = session.session_id.as_deref().unwrap_or("unknown");
        let cache = format!(
            "{} / {}",
            format_tokens(session.usage.cache_read),
            format_tokens(session.usage.cache_write)
        );
        println!(
            "{:<35}{:<12}{:<14}{:<20}{:<12}{}",
            truncate(&model, 32),
            format!("{} min", session.duration_min),
            format_tokens(session.usage.total_tokens),
            cache,
            format!("${:.4}", session.usage.cost_total),
            truncate(session_id, 32)
        );
    }

    /// Verbose block for one session, shared between `--details` and the
    /// single-session mode.
    pub fn print_session_detail(&self, session: &SessionSummary) {
        let first = session
            .first_timestamp
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "N/A".to_string());
        let last = session
            .last_timestamp
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "Session: {}",
            session.session_id.as_deref().unwrap_or("unknown").bright_white().bold()
        );
        println!(
            "Model: {} ({})",
            session.model_key().bright_cyan(),
            session.api
        );
        println!("Duration: {} minutes", session.duration_min);
        println!("Timestamps: {} → {}", first, last);
        println!(
            "Tokens: input={}, output={}, total={}",
            format_count(session.usage.input),
            format_count(session.usage.output),
            format_count(session.usage.total_tokens)
        );
        println!(
            "Cache: read={}, write={}",
            format_count(session.usage.cache_read),
            format_count(session.usage.cache_write)
        );
        println!(
            "Cost: {} (input=${:.4}, output=${:.4})",
            format!("${:.4}", session.usage.cost_total).bright_green(),
            session.usage.cost_input,
            session.usage.cost_output
        );
    }

    /// Build the machine-readable report. Pure: the caller decides where it
    /// is printed.
    pub fn build_report(
        &self,
        sessions: &[SessionSummary],
        groups: &[(String, Vec<&SessionSummary>)],
        offset: Option<&str>,
    ) -> UsageReport {
        let mut models = BTreeMap::new();
        for (key, members) in groups {
            let totals = sum_usage(members);
            models.insert(key.clone(), ModelReport::from_totals(members.len(), &totals));
        }

        let grand_total = if groups.len() > 1 {
            let refs: Vec<&SessionSummary> = sessions.iter().collect();
            Some(ModelReport::from_totals(sessions.len(), &sum_usage(&refs)))
        } else {
            None
        };

        UsageReport {
            models,
            grand_total,
            offset: offset.map(str::to_string),
        }
    }

    /// Build the Discord-style digest message.
    pub fn build_digest(
        &self,
        sessions: &[SessionSummary],
        groups: &[(String, Vec<&SessionSummary>)],
        offset: Option<&str>,
    ) -> String {
        let mut lines = Vec::new();

        lines.push("💰 **Usage Summary**".to_string());
        if let Some(offset) = offset {
            lines.push(format!("(last {})", offset));
        }
        lines.push(String::new());

        let refs: Vec<&SessionSummary> = sessions.iter().collect();
        let grand = sum_usage(&refs);
        lines.push(format!("**Total Cost:** ${:.2}", grand.cost_total));
        lines.push(format!(
            "**Total Tokens:** {}",
            format_tokens(grand.total_tokens)
        ));
        lines.push(format!("**Sessions:** {}", sessions.len()));

        let providers = group_by_provider(sessions);
        if providers.len() > 1 {
            lines.push(String::new());
            lines.push("**By Provider:**".to_string());
            for (provider, members) in &providers {
                let totals = sum_usage(members);
                lines.push(format!(
                    "• {}: ${:.2} ({} tokens)",
                    provider,
                    totals.cost_total,
                    format_tokens(totals.total_tokens)
                ));
            }
        }

        let mut ranked: Vec<(&String, Usage)> = groups
            .iter()
            .map(|(key, members)| (key, sum_usage(members)))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.cost_total
                .partial_cmp(&a.1.cost_total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(5);

        if !ranked.is_empty() {
            lines.push(String::new());
            lines.push("**Top Models:**".to_string());
            for (key, totals) in &ranked {
                lines.push(format!(
                    "• {}: ${:.2} ({} tokens)",
                    key,
                    totals.cost_total,
                    format_tokens(totals.total_tokens)
                ));
            }
        }

        lines.join("\n")
    }
}
