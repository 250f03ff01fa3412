use serde::{Deserialize, Serialize};

use super::enums::{Gender, Method};

/// A person receiving treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Age in years, if known.
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anamnesis: Option<Anamnesis>,
}

/// Fields supplied when creating or replacing a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub anamnesis: Option<Anamnesis>,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Intake documentation. Informational only; it never opens a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anamnesis {
    #[serde(default)]
    pub previous_therapies: Vec<TherapyEntry>,
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_problem_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_problem_text: Option<String>,
    /// Planned method as typed by the practitioner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_method_text: Option<String>,
    /// Planned method mapped onto the canonical set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_method: Option<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyEntry {
    /// e.g. "Psychotherapie"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Whether the client currently takes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
}
