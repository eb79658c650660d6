use crate::models::SessionSummary;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

/// Parse a compact offset expression (`30m`, `2h`, `7d`) into a duration.
///
/// Anything that does not match `<digits><m|h|d>` is a configuration error.
pub fn parse_offset(expr: &str) -> Result<Duration> {
    let unit = expr
        .chars()
        .last()
        .context("Invalid time offset: empty expression. Use: 30m, 2h, 7d")?;
    let digits = &expr[..expr.len() - unit.len_utf8()];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("Invalid time offset '{}'. Use: 30m, 2h, 7d", expr);
    }
    let value: i64 = digits
        .parse()
        .with_context(|| format!("Invalid time offset '{}'. Use: 30m, 2h, 7d", expr))?;

    match unit {
        'm' => Ok(Duration::minutes(value)),
        'h' => Ok(Duration::hours(value)),
        'd' => Ok(Duration::days(value)),
        _ => anyhow::bail!("Invalid time offset '{}'. Use: 30m, 2h, 7d", expr),
    }
}

/// Resolve an offset expression to the cutoff instant `now - offset`.
pub fn cutoff_from_offset(expr: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Ok(now - parse_offset(expr)?)
}

/// Time-window predicate over a finished summary.
///
/// No cutoff passes everything. A summary with no first timestamp also
/// passes: undated sessions are never dropped as stale. Otherwise the
/// session's earliest timestamp must be at or after the cutoff.
pub fn within_window(summary: &SessionSummary, cutoff: Option<DateTime<Utc>>) -> bool {
    match (cutoff, summary.first_timestamp) {
        (Some(cutoff), Some(first)) => first >= cutoff,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Usage;
    use std::path::PathBuf;

    fn summary_with_first(first: Option<DateTime<Utc>>) -> SessionSummary {
        SessionSummary {
            file: "s.jsonl".to_string(),
            full_path: PathBuf::from("s.jsonl"),
            session_id: None,
            api: "unknown".to_string(),
            provider: "unknown".to_string(),
            model: "unknown".to_string(),
            usage: Usage::default(),
            first_timestamp: first,
            last_timestamp: first,
            duration_min: 0,
        }
    }

    #[test]
    fn test_parse_offset_units() {
        assert_eq!(parse_offset("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_offset("2h").unwrap(), Duration::hours(2));
        assert_eq!(parse_offset("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_parse_offset_rejects_malformed() {
        for expr in ["", "7", "d", "7w", "h2", "2.5h", "-3d", "7dd", "24 h"] {
            assert!(parse_offset(expr).is_err(), "{:?} should be rejected", expr);
        }
    }

    #[test]
    fn test_no_cutoff_passes() {
        let summary = summary_with_first(None);
        assert!(within_window(&summary, None));
    }

    #[test]
    fn test_undated_session_passes_with_cutoff() {
        let summary = summary_with_first(None);
        let cutoff = Utc::now() - Duration::hours(24);
        assert!(within_window(&summary, Some(cutoff)));
    }

    #[test]
    fn test_24h_window_boundaries() {
        let now = Utc::now();
        let cutoff = cutoff_from_offset("24h", now).unwrap();

        let stale = summary_with_first(Some(now - Duration::hours(25)));
        assert!(!within_window(&stale, Some(cutoff)));

        let fresh = summary_with_first(Some(now - Duration::hours(23)));
        assert!(within_window(&fresh, Some(cutoff)));
    }

    #[test]
    fn test_cutoff_boundary_is_inclusive() {
        let now = Utc::now();
        let cutoff = now - Duration::hours(24);
        let boundary = summary_with_first(Some(cutoff));
        assert!(within_window(&boundary, Some(cutoff)));
    }
}
