use serde::{Deserialize, Serialize};

use super::enums::Method;

/// A single treatment session belonging to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub case_id: i64,
    /// ISO 8601 timestamp.
    pub started_at: String,
    #[serde(default)]
    pub duration_min: Option<u32>,
    pub method: Method,
    /// Kept for older records; no longer captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_hypnosis: Option<u8>,
    /// Subjective units of distress (0-10) before the session.
    #[serde(default)]
    pub sud_before: Option<u8>,
    /// Subjective units of distress (0-10) after the session.
    #[serde(default)]
    pub sud_after: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_release: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Session {
    /// Distress reduction (`before - after`); positive means improvement.
    pub fn sud_delta(&self) -> Option<i32> {
        match (self.sud_before, self.sud_after) {
            (Some(before), Some(after)) => Some(before as i32 - after as i32),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub case_id: i64,
    pub started_at: String,
    pub duration_min: Option<u32>,
    pub method: Method,
    pub ease_hypnosis: Option<u8>,
    pub sud_before: Option<u8>,
    pub sud_after: Option<u8>,
    pub emotional_release: Option<String>,
    pub insights: Option<String>,
    pub notes: Option<String>,
}

impl NewSession {
    pub fn new(case_id: i64, started_at: impl Into<String>, method: Method) -> Self {
        Self {
            case_id,
            started_at: started_at.into(),
            duration_min: None,
            method,
            ease_hypnosis: None,
            sud_before: None,
            sud_after: None,
            emotional_release: None,
            insights: None,
            notes: None,
        }
    }

    pub fn into_session(self, id: i64) -> Session {
        Session {
            id,
            case_id: self.case_id,
            started_at: self.started_at,
            duration_min: self.duration_min,
            method: self.method,
            ease_hypnosis: self.ease_hypnosis,
            sud_before: self.sud_before,
            sud_after: self.sud_after,
            emotional_release: self.emotional_release,
            insights: self.insights,
            notes: self.notes,
        }
    }
}

/// Partial update of a session; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPatch {
    pub started_at: Option<String>,
    pub duration_min: Option<u32>,
    pub method: Option<Method>,
    pub sud_before: Option<u8>,
    pub sud_after: Option<u8>,
    pub emotional_release: Option<String>,
    pub insights: Option<String>,
    pub notes: Option<String>,
}

impl SessionPatch {
    pub fn apply(&self, session: &mut Session) {
        if let Some(started_at) = &self.started_at {
            session.started_at = started_at.clone();
        }
        if self.duration_min.is_some() {
            session.duration_min = self.duration_min;
        }
        if let Some(method) = self.method {
            session.method = method;
        }
        if self.sud_before.is_some() {
            session.sud_before = self.sud_before;
        }
        if self.sud_after.is_some() {
            session.sud_after = self.sud_after;
        }
        if self.emotional_release.is_some() {
            session.emotional_release = self.emotional_release.clone();
        }
        if self.insights.is_some() {
            session.insights = self.insights.clone();
        }
        if self.notes.is_some() {
            session.notes = self.notes.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sud_delta_requires_both_ratings() {
        let mut session = NewSession::new(1, "2025-01-01T10:00:00Z", Method::Coaching).into_session(1);
        assert_eq!(session.sud_delta(), None);

        session.sud_before = Some(8);
        assert_eq!(session.sud_delta(), None);

        session.sud_after = Some(3);
        assert_eq!(session.sud_delta(), Some(5));

        session.sud_after = Some(9);
        assert_eq!(session.sud_delta(), Some(-1));
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut session = NewSession::new(1, "2025-01-01T10:00:00Z", Method::Coaching).into_session(7);
        session.notes = Some("keep".to_string());

        let patch = SessionPatch {
            method: Some(Method::Other),
            duration_min: Some(50),
            ..Default::default()
        };
        patch.apply(&mut session);

        assert_eq!(session.method, Method::Other);
        assert_eq!(session.duration_min, Some(50));
        assert_eq!(session.notes.as_deref(), Some("keep"));
        assert_eq!(session.started_at, "2025-01-01T10:00:00Z");
    }
}
