use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Client gender as recorded on intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// weiblich
    W,
    /// männlich
    M,
    /// divers
    D,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::W, Gender::M, Gender::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::W => "w",
            Gender::M => "m",
            Gender::D => "d",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Gender::W),
            "m" => Ok(Gender::M),
            "d" => Ok(Gender::D),
            _ => Err(Error::UnknownVariant {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment method used in a session.
///
/// Declaration order is the canonical tie-break order for sorted outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    AufloesendeHypnose,
    KlassischeHypnose,
    Coaching,
    Other,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::AufloesendeHypnose,
        Method::KlassischeHypnose,
        Method::Coaching,
        Method::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::AufloesendeHypnose => "aufloesende_hypnose",
            Method::KlassischeHypnose => "klassische_hypnose",
            Method::Coaching => "coaching",
            Method::Other => "other",
        }
    }

    /// Human-readable label used by reports.
    pub fn label(&self) -> &'static str {
        match self {
            Method::AufloesendeHypnose => "Auflösende Hypnose",
            Method::KlassischeHypnose => "Klassische Hypnose",
            Method::Coaching => "Coaching",
            Method::Other => "Sonstige",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "method",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presenting-problem category of a case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCategory {
    Overweight,
    SocialAnxiety,
    Panic,
    Depression,
    Sleep,
    Pain,
    SelfWorth,
    Relationship,
    #[default]
    Other,
}

impl ProblemCategory {
    pub const ALL: [ProblemCategory; 9] = [
        ProblemCategory::Overweight,
        ProblemCategory::SocialAnxiety,
        ProblemCategory::Panic,
        ProblemCategory::Depression,
        ProblemCategory::Sleep,
        ProblemCategory::Pain,
        ProblemCategory::SelfWorth,
        ProblemCategory::Relationship,
        ProblemCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemCategory::Overweight => "overweight",
            ProblemCategory::SocialAnxiety => "social_anxiety",
            ProblemCategory::Panic => "panic",
            ProblemCategory::Depression => "depression",
            ProblemCategory::Sleep => "sleep",
            ProblemCategory::Pain => "pain",
            ProblemCategory::SelfWorth => "self_worth",
            ProblemCategory::Relationship => "relationship",
            ProblemCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProblemCategory::Overweight => "Übergewicht",
            ProblemCategory::SocialAnxiety => "Soziale Angst",
            ProblemCategory::Panic => "Panik",
            ProblemCategory::Depression => "Depression",
            ProblemCategory::Sleep => "Schlafproblem",
            ProblemCategory::Pain => "Schmerzen",
            ProblemCategory::SelfWorth => "Selbstwert",
            ProblemCategory::Relationship => "Beziehungen",
            ProblemCategory::Other => "Sonstige",
        }
    }
}

impl FromStr for ProblemCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProblemCategory::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "problem category",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
