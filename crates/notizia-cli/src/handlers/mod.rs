pub mod case;
pub mod client;
pub mod demo;
pub mod query;
pub mod report;
pub mod session;

use anyhow::Result;
use notizia_engine::calendar::parse_started_at;

/// Reject a user-supplied start date the reports could not place on a calendar.
fn checked_started_at(raw: String) -> Result<String> {
    let trimmed = raw.trim();
    if parse_started_at(trimmed).is_none() {
        anyhow::bail!(
            "Invalid started_at: '{}' is not an ISO 8601 date or timestamp",
            raw
        );
    }
    Ok(trimmed.to_string())
}
