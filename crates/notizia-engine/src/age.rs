use serde::{Deserialize, Serialize};

/// Label of the bucket for sessions whose client age is not recorded.
pub const UNKNOWN_AGE_LABEL: &str = "Unbekannt";

/// Fixed age buckets used by all age breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeClass {
    Minor,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeClass {
    pub const ALL: [AgeClass; 5] = [
        AgeClass::Minor,
        AgeClass::YoungAdult,
        AgeClass::Adult,
        AgeClass::MiddleAged,
        AgeClass::Senior,
    ];

    pub fn of(age: u32) -> Self {
        match age {
            0..=17 => AgeClass::Minor,
            18..=29 => AgeClass::YoungAdult,
            30..=44 => AgeClass::Adult,
            45..=59 => AgeClass::MiddleAged,
            _ => AgeClass::Senior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeClass::Minor => "0–17",
            AgeClass::YoungAdult => "18–29",
            AgeClass::Adult => "30–44",
            AgeClass::MiddleAged => "45–59",
            AgeClass::Senior => "60+",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeClassCount {
    pub label: String,
    pub count: usize,
}

/// Turn per-bucket counters into labeled entries, in bucket order.
pub(crate) fn labeled(counts: &[usize; 5]) -> Vec<AgeClassCount> {
    AgeClass::ALL
        .iter()
        .map(|class| AgeClassCount {
            label: class.label().to_string(),
            count: counts[class.index()],
        })
        .collect()
}
