use serde::{Deserialize, Serialize};

use super::enums::ProblemCategory;
use super::status::CaseStatus;

/// A presenting problem a client is treated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: i64,
    pub client_id: i64,
    #[serde(default)]
    pub problem_category: ProblemCategory,
    #[serde(default)]
    pub problem_text: String,
    /// ISO 8601 timestamp.
    pub started_at: String,
    #[serde(default)]
    pub status: CaseStatus,
    /// Not used by analytics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

impl Case {
    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCase {
    pub client_id: i64,
    pub problem_category: ProblemCategory,
    pub problem_text: String,
    pub started_at: String,
    /// Defaults to `Open` when absent.
    pub status: Option<CaseStatus>,
    pub severity: Option<u8>,
}

/// Partial update of a case; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasePatch {
    pub id: i64,
    pub problem_category: Option<ProblemCategory>,
    pub problem_text: Option<String>,
    pub started_at: Option<String>,
    pub status: Option<CaseStatus>,
    pub severity: Option<u8>,
}

impl CasePatch {
    pub fn status(id: i64, status: CaseStatus) -> Self {
        Self {
            id,
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(&self, case: &mut Case) {
        if let Some(problem_category) = self.problem_category {
            case.problem_category = problem_category;
        }
        if let Some(problem_text) = &self.problem_text {
            case.problem_text = problem_text.clone();
        }
        if let Some(started_at) = &self.started_at {
            case.started_at = started_at.clone();
        }
        if let Some(status) = self.status {
            case.status = status;
        }
        if self.severity.is_some() {
            case.severity = self.severity;
        }
    }
}
