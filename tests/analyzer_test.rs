use chrono::{Duration, Utc};
use session_cost::aggregate::group_by_model;
use session_cost::analyzer::SessionCostAnalyzer;
use session_cost::display::DisplayManager;
use session_cost::file_discovery::FileDiscovery;

mod common;

#[test]
fn test_same_model_key_groups_and_sums() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let now = Utc::now().to_rfc3339();
    common::create_test_jsonl(
        dir.path(),
        "a.jsonl",
        &common::billed_message("anthropic", "x", &now, 100, 50, 1.5),
    )?;
    common::create_test_jsonl(
        dir.path(),
        "b.jsonl",
        &common::billed_message("anthropic", "x", &now, 200, 100, 2.5),
    )?;

    let analyzer = SessionCostAnalyzer::new();
    let files = FileDiscovery::new().find_jsonl_files(dir.path())?;
    let sessions = analyzer.analyze_files(&files, None)?;
    assert_eq!(sessions.len(), 2);

    let groups = group_by_model(&sessions);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].0, "anthropic/x");

    let report = DisplayManager::new().build_report(&sessions, &groups, None);
    assert_eq!(report.models["anthropic/x"].cost.total, 4.0);
    assert!(report.grand_total.is_none(), "single model key");

    Ok(())
}

#[test]
fn test_two_model_keys_emit_grand_total() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let now = Utc::now().to_rfc3339();
    common::create_test_jsonl(
        dir.path(),
        "a.jsonl",
        &common::billed_message("anthropic", "x", &now, 100, 50, 1.5),
    )?;
    common::create_test_jsonl(
        dir.path(),
        "b.jsonl",
        &common::billed_message("anthropic", "x", &now, 10, 5, 0.5),
    )?;
    common::create_test_jsonl(
        dir.path(),
        "c.jsonl",
        &common::billed_message("openai", "y", &now, 200, 100, 2.0),
    )?;

    let analyzer = SessionCostAnalyzer::new();
    let files = FileDiscovery::new().find_jsonl_files(dir.path())?;
    let sessions = analyzer.analyze_files(&files, None)?;
    let groups = group_by_model(&sessions);
    assert_eq!(groups.len(), 2);

    let report = DisplayManager::new().build_report(&sessions, &groups, None);
    let grand = report.grand_total.expect("two model keys");
    assert_eq!(grand.sessions, 3);

    let group_sum: f64 = report.models.values().map(|m| m.cost.total).sum();
    assert!((grand.cost.total - group_sum).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_24h_window_drops_stale_sessions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let now = Utc::now();
    let stale = (now - Duration::hours(25)).to_rfc3339();
    let fresh = (now - Duration::hours(23)).to_rfc3339();

    common::create_test_jsonl(
        dir.path(),
        "stale.jsonl",
        &common::billed_message("anthropic", "x", &stale, 1, 1, 0.1),
    )?;
    common::create_test_jsonl(
        dir.path(),
        "fresh.jsonl",
        &common::billed_message("anthropic", "x", &fresh, 1, 1, 0.1),
    )?;

    let analyzer = SessionCostAnalyzer::new();
    let files = FileDiscovery::new().find_jsonl_files(dir.path())?;
    let cutoff = now - Duration::hours(24);
    let sessions = analyzer.analyze_files(&files, Some(cutoff))?;

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].file, "fresh.jsonl");

    Ok(())
}

#[test]
fn test_undated_session_survives_window() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // Only malformed lines: zero usage, no timestamps.
    common::create_test_jsonl(dir.path(), "noise.jsonl", "not json\n{broken\n")?;

    let analyzer = SessionCostAnalyzer::new();
    let files = FileDiscovery::new().find_jsonl_files(dir.path())?;
    let cutoff = Utc::now() - Duration::hours(24);
    let sessions = analyzer.analyze_files(&files, Some(cutoff))?;

    assert_eq!(sessions.len(), 1, "no timestamp means the window passes it");
    assert_eq!(sessions[0].usage.total_tokens, 0);
    assert!(sessions[0].first_timestamp.is_none());

    Ok(())
}

#[test]
fn test_session_marker_and_mixed_records() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let early = "2024-06-01T09:00:00Z";
    let late = "2024-06-01T10:30:00Z";
    let content = format!(
        "{}\n{}\n{}\n",
        common::session_marker("abc123", early),
        common::billed_message("anthropic", "x", late, 100, 50, 1.5),
        // Zero-cost wrapper after the billed call: tokens count, identity
        // stays put.
        serde_json::json!({
            "type": "message",
            "message": {
                "provider": "wrapper",
                "model": "relay",
                "usage": { "input": 7, "totalTokens": 7, "cost": { "total": 0 } }
            }
        })
    );
    common::create_test_jsonl(dir.path(), "abc123.jsonl", &content)?;

    let analyzer = SessionCostAnalyzer::new();
    let files = FileDiscovery::new().find_jsonl_files(dir.path())?;
    let sessions = analyzer.analyze_files(&files, None)?;
    assert_eq!(sessions.len(), 1);

    let session = &sessions[0];
    assert_eq!(session.session_id.as_deref(), Some("abc123"));
    assert_eq!(session.provider, "anthropic");
    assert_eq!(session.model, "x");
    assert_eq!(session.usage.input, 107);
    assert_eq!(session.usage.total_tokens, 157);
    assert_eq!(session.duration_min, 90);

    Ok(())
}
