use crate::{Client, Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Validate a client display name and return it trimmed.
pub fn validate_client_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "name",
            message: "name is required".to_string(),
        });
    }
    if trimmed.chars().count() < 2 {
        return Err(Error::Validation {
            field: "name",
            message: "name must have at least 2 characters".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive name search, newest client (highest id) first.
pub fn filter_and_sort_clients(clients: &[Client], search: &str) -> Vec<Client> {
    let needle = search.trim().to_lowercase();
    let mut matched: Vec<Client> = clients
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.id.cmp(&a.id));
    matched
}

/// Label used in confirmation prompts, e.g. `Anna (#3)`.
pub fn client_label(clients: &[Client], id: i64) -> String {
    match clients.iter().find(|c| c.id == id) {
        Some(c) => format!("{} (#{})", c.name, c.id),
        None => format!("#{}", id),
    }
}

/// Truncate a string to a maximum number of characters
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect::<String>() + "…"
    }
}

const NAIVE_INSTANT_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Point in time of a `started_at` value, normalized to UTC.
///
/// Values without an offset are taken as UTC; a bare date is its midnight.
pub fn started_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in NAIVE_INSTANT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Descending by instant, unparseable values last, then by raw text and id.
pub fn newest_first(a_started: &str, a_id: i64, b_started: &str, b_id: i64) -> Ordering {
    let by_instant = match (started_instant(a_started), started_instant(b_started)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_instant
        .then_with(|| b_started.cmp(a_started))
        .then(b_id.cmp(&a_id))
}
