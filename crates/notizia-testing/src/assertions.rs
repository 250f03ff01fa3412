//! Assertions over the CLI's JSON output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a JSON array has the expected length.
pub fn assert_len(json: &Value, expected: usize) -> Result<()> {
    let items = json.as_array().context("Expected a JSON array")?;

    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }

    Ok(())
}

/// Assert the session count reported by `report run`.
pub fn assert_total_sessions(report: &Value, expected: u64) -> Result<()> {
    let total = report["total_sessions"]
        .as_u64()
        .context("Expected 'total_sessions' in report")?;

    if total != expected {
        anyhow::bail!("Expected {} sessions, got {}", expected, total);
    }

    Ok(())
}

/// Assert the count of one method in `sessions_by_method`.
pub fn assert_method_count(report: &Value, method: &str, expected: u64) -> Result<()> {
    let methods = report["sessions_by_method"]
        .as_array()
        .context("Expected 'sessions_by_method' array in report")?;

    let count = methods
        .iter()
        .find(|m| m["method"].as_str() == Some(method))
        .and_then(|m| m["count"].as_u64())
        .unwrap_or(0);

    if count != expected {
        anyhow::bail!(
            "Expected {} sessions for method {}, got {}",
            expected,
            method,
            count
        );
    }

    Ok(())
}

/// Extract the `id` field of a created record.
pub fn id_of(json: &Value) -> Result<i64> {
    json["id"].as_i64().context("Expected numeric 'id' field")
}
