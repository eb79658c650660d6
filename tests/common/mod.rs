use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn create_test_jsonl(dir: &Path, filename: &str, content: &str) -> Result<()> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(())
}

/// One billed message line: carries usage, a positive cost total and the
/// backend identity fields.
#[allow(dead_code)]
pub fn billed_message(
    provider: &str,
    model: &str,
    timestamp: &str,
    input: u64,
    output: u64,
    cost_total: f64,
) -> String {
    serde_json::json!({
        "type": "message",
        "timestamp": timestamp,
        "message": {
            "provider": provider,
            "model": model,
            "api": "chat",
            "usage": {
                "input": input,
                "output": output,
                "totalTokens": input + output,
                "cost": { "total": cost_total }
            }
        }
    })
    .to_string()
}

#[allow(dead_code)]
pub fn session_marker(id: &str, timestamp: &str) -> String {
    serde_json::json!({
        "type": "session",
        "id": id,
        "timestamp": timestamp
    })
    .to_string()
}
