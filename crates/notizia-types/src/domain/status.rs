use serde::{Deserialize, Serialize};
use std::fmt;

/// Status values that older records used to mark a case as finished.
const CLOSED_SYNONYMS: [&str; 5] = ["solved", "closed", "done", "abgeschlossen", "erledigt"];

/// Lifecycle state of a case.
///
/// Stored records may carry free-form legacy strings; those are mapped
/// through [`CaseStatus::from_legacy`] whenever they are read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CaseStatus {
    #[default]
    Open,
    Resolved,
    Dropped,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Open, CaseStatus::Resolved, CaseStatus::Dropped];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Resolved => "resolved",
            CaseStatus::Dropped => "dropped",
        }
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self, CaseStatus::Open)
    }

    /// Map a stored status string onto the closed enumeration.
    ///
    /// Unrecognized values other than `open` become `Dropped`, so they keep
    /// counting as closed the way the free-form field always did.
    pub fn from_legacy(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" | "open" => CaseStatus::Open,
            "resolved" => CaseStatus::Resolved,
            s if CLOSED_SYNONYMS.contains(&s) => CaseStatus::Resolved,
            _ => CaseStatus::Dropped,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(raw: String) -> Self {
        CaseStatus::from_legacy(&raw)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw status string as closed.
///
/// Empty or absent is open; a known synonym is closed; anything else is
/// closed unless it is exactly `open` after trimming and lowercasing.
pub fn is_closed(status: Option<&str>) -> bool {
    let normalized = status.unwrap_or_default().trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if CLOSED_SYNONYMS.contains(&normalized.as_str()) {
        return true;
    }
    normalized != "open"
}
