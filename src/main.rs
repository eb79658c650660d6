use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use session_cost::analyzer::{OutputFormat, RunOptions, SessionCostAnalyzer};
use session_cost::config::get_config;
use session_cost::logging::init_logging;

#[derive(Parser)]
#[command(name = "session-cost")]
#[command(about = "Analyze OpenClaw session logs for token usage and cost")]
#[command(version)]
struct Cli {
    /// Directory to scan for .jsonl session logs
    /// (default: ~/.openclaw/agents/main/sessions)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Only include sessions from the last N units (30m, 2h, 7d)
    #[arg(long)]
    offset: Option<String>,

    /// Filter by model provider (anthropic, openai, ollama, ...)
    #[arg(long)]
    provider: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Shorthand for --format json (backwards compat)
    #[arg(long)]
    json: bool,

    /// Show per-session details, optionally for one session id
    /// (looks for <id>.jsonl under the scan path)
    #[arg(long, value_name = "SESSION_ID", num_args = 0..=1)]
    details: Option<Option<String>>,

    /// Compact table layout (use with --details)
    #[arg(long)]
    table: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();
    let config = get_config();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format
    };
    let (details, session) = match cli.details {
        Some(Some(id)) => (true, Some(id)),
        Some(None) => (true, None),
        None => (false, None),
    };

    let options = RunOptions {
        path: cli
            .path
            .unwrap_or_else(|| config.paths.sessions_dir.clone()),
        offset: cli.offset,
        provider: cli.provider,
        format,
        details,
        session,
        table: cli.table,
    };

    let analyzer = SessionCostAnalyzer::new();
    if let Err(e) = analyzer.run(options) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
