//! Usage aggregation and model grouping.
//!
//! Both operations are pure reductions over finished summaries: [`sum_usage`]
//! is the element-wise sum of every usage field (associative and
//! commutative), and [`group_by_model`] partitions summaries by their
//! `provider/model` key while preserving discovery order.

use crate::models::{SessionSummary, Usage};
use std::collections::HashMap;

/// Element-wise sum of every usage field, from an all-zero accumulator.
pub fn sum_usage(sessions: &[&SessionSummary]) -> Usage {
    let mut totals = Usage::default();
    for session in sessions {
        totals.add(&session.usage);
    }
    totals
}

/// Partition summaries by `provider/model`, first-seen order for both keys
/// and members. The `api` field plays no part in the key.
pub fn group_by_model<'a>(
    sessions: &'a [SessionSummary],
) -> Vec<(String, Vec<&'a SessionSummary>)> {
    let mut groups: Vec<(String, Vec<&SessionSummary>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let key = session.model_key();
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(session),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![session]));
            }
        }
    }

    groups
}

/// Partition summaries by provider alone, first-seen order. Used by the
/// digest formatter's provider breakdown.
pub fn group_by_provider<'a>(
    sessions: &'a [SessionSummary],
) -> Vec<(String, Vec<&'a SessionSummary>)> {
    let mut groups: Vec<(String, Vec<&SessionSummary>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        match index.get(&session.provider) {
            Some(&slot) => groups[slot].1.push(session),
            None => {
                index.insert(session.provider.clone(), groups.len());
                groups.push((session.provider.clone(), vec![session]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary(provider: &str, model: &str, api: &str, cost_total: f64, input: u64) -> SessionSummary {
        SessionSummary {
            file: format!("{}-{}.jsonl", provider, model),
            full_path: PathBuf::from("x.jsonl"),
            session_id: None,
            api: api.to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            usage: Usage {
                input,
                total_tokens: input,
                cost_total,
                ..Default::default()
            },
            first_timestamp: None,
            last_timestamp: None,
            duration_min: 0,
        }
    }

    #[test]
    fn test_sum_is_order_invariant() {
        let a = summary("anthropic", "x", "messages", 1.5, 100);
        let b = summary("openai", "y", "responses", 2.5, 50);
        let c = summary("anthropic", "x", "messages", 0.25, 7);

        let forward = sum_usage(&[&a, &b, &c]);
        let backward = sum_usage(&[&c, &b, &a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_sum_splits_and_recombines() {
        let a = summary("anthropic", "x", "messages", 1.5, 100);
        let b = summary("openai", "y", "responses", 2.5, 50);
        let c = summary("ollama", "z", "generate", 0.0, 9);

        let whole = sum_usage(&[&a, &b, &c]);
        let mut combined = sum_usage(&[&a]);
        combined.add(&sum_usage(&[&b, &c]));
        assert_eq!(whole, combined);
    }

    #[test]
    fn test_singleton_identity() {
        let a = summary("anthropic", "x", "messages", 1.5, 100);
        let totals = sum_usage(&[&a]);
        assert_eq!(totals, a.usage);
        assert_eq!(totals.cost_total, a.usage.cost_total);
    }

    #[test]
    fn test_empty_sum_is_zero() {
        assert_eq!(sum_usage(&[]), Usage::default());
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let sessions = vec![
            summary("openai", "y", "responses", 2.5, 50),
            summary("anthropic", "x", "messages", 1.5, 100),
            summary("openai", "y", "responses", 0.5, 10),
        ];
        let groups = group_by_model(&sessions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "openai/y");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "anthropic/x");
    }

    #[test]
    fn test_api_is_not_part_of_the_key() {
        let sessions = vec![
            summary("anthropic", "x", "messages", 1.5, 1),
            summary("anthropic", "x", "batch", 2.5, 2),
        ];
        let groups = group_by_model(&sessions);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let sessions = vec![
            summary("Anthropic", "x", "messages", 1.0, 1),
            summary("anthropic", "x", "messages", 1.0, 1),
        ];
        assert_eq!(group_by_model(&sessions).len(), 2);
    }

    #[test]
    fn test_group_by_provider() {
        let sessions = vec![
            summary("anthropic", "x", "messages", 1.5, 1),
            summary("anthropic", "y", "messages", 0.5, 1),
            summary("openai", "z", "responses", 2.0, 1),
        ];
        let groups = group_by_provider(&sessions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "anthropic");
        assert_eq!(groups[0].1.len(), 2);
    }
}
