pub mod case;
pub mod client;
pub mod enums;
pub mod session;
pub mod status;

pub use case::{Case, CasePatch, NewCase};
pub use client::{Anamnesis, Client, MedicationEntry, NewClient, TherapyEntry};
pub use enums::{Gender, Method, ProblemCategory};
pub use session::{NewSession, Session, SessionPatch};
pub use status::{CaseStatus, is_closed};

use serde::{Deserialize, Serialize};

/// One session joined with its case and that case's client.
///
/// Materialized by the store; analytics never look records up on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub session: Session,
    pub case: Case,
    pub client: Client,
}
