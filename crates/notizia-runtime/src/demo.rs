//! Seeded practice for trying the reports without real records.

use notizia_store::{MemoryStore, Storage};
use notizia_types::{CaseStatus, Gender, Method, NewCase, NewClient, NewSession, ProblemCategory};

use crate::{Practice, Result};

struct DemoCase {
    problem: ProblemCategory,
    text: &'static str,
    started_at: &'static str,
    status: CaseStatus,
    /// (started_at, method, duration_min, sud_before, sud_after)
    sessions: &'static [(&'static str, Method, u32, u8, u8)],
}

struct DemoClient {
    name: &'static str,
    gender: Option<Gender>,
    age: Option<u32>,
    cases: &'static [DemoCase],
}

const DEMO: &[DemoClient] = &[
    DemoClient {
        name: "Test-Client",
        gender: Some(Gender::W),
        age: Some(34),
        cases: &[DemoCase {
            problem: ProblemCategory::Panic,
            text: "Panikattacken im Supermarkt",
            started_at: "2024-11-04",
            status: CaseStatus::Resolved,
            sessions: &[
                ("2024-11-04T09:00:00Z", Method::Coaching, 60, 8, 6),
                ("2024-11-18T09:00:00Z", Method::AufloesendeHypnose, 90, 7, 3),
                ("2024-12-02T09:00:00Z", Method::AufloesendeHypnose, 75, 4, 1),
            ],
        }],
    },
    DemoClient {
        name: "Jonas",
        gender: Some(Gender::M),
        age: Some(52),
        cases: &[
            DemoCase {
                problem: ProblemCategory::Overweight,
                text: "Abnehmen, Heißhunger am Abend",
                started_at: "2024-12-09",
                status: CaseStatus::Open,
                sessions: &[
                    ("2024-12-09T17:00:00Z", Method::KlassischeHypnose, 60, 6, 5),
                    ("2024-12-30T17:00:00Z", Method::KlassischeHypnose, 60, 6, 4),
                    ("2025-01-20T17:00:00Z", Method::Coaching, 45, 5, 4),
                ],
            },
            DemoCase {
                problem: ProblemCategory::Sleep,
                text: "Durchschlafprobleme",
                started_at: "2025-02-03",
                status: CaseStatus::Dropped,
                sessions: &[("2025-02-03T18:30:00Z", Method::KlassischeHypnose, 50, 7, 6)],
            },
        ],
    },
    DemoClient {
        name: "Mika",
        gender: Some(Gender::D),
        age: Some(23),
        cases: &[DemoCase {
            problem: ProblemCategory::SocialAnxiety,
            text: "Angst vor Vorträgen",
            started_at: "2025-01-13",
            status: CaseStatus::Resolved,
            sessions: &[
                ("2025-01-13T11:00:00Z", Method::AufloesendeHypnose, 90, 9, 5),
                ("2025-01-27T11:00:00Z", Method::AufloesendeHypnose, 60, 5, 2),
            ],
        }],
    },
    DemoClient {
        name: "Frau Berger",
        gender: Some(Gender::W),
        age: None,
        cases: &[DemoCase {
            problem: ProblemCategory::Pain,
            text: "Chronische Rückenschmerzen",
            started_at: "2025-02-17",
            status: CaseStatus::Open,
            sessions: &[("2025-02-17T14:00:00Z", Method::Other, 30, 6, 6)],
        }],
    },
];

/// Fill `store` with a handful of clients, cases and sessions.
pub fn seed_demo(store: &mut dyn Storage) -> Result<()> {
    for demo in DEMO {
        let mut new_client = NewClient::new(demo.name);
        new_client.gender = demo.gender;
        new_client.age = demo.age;
        let client = store.add_client(new_client)?;

        for demo_case in demo.cases {
            let case = store.add_case(NewCase {
                client_id: client.id,
                problem_category: demo_case.problem,
                problem_text: demo_case.text.to_string(),
                started_at: demo_case.started_at.to_string(),
                status: Some(demo_case.status),
                severity: None,
            })?;

            for &(started_at, method, duration, before, after) in demo_case.sessions {
                let mut session = NewSession::new(case.id, started_at, method);
                session.duration_min = Some(duration);
                session.sud_before = Some(before);
                session.sud_after = Some(after);
                store.add_session(session)?;
            }
        }
    }

    tracing::debug!(clients = DEMO.len(), "demo practice seeded");
    Ok(())
}

impl Practice {
    /// In-memory practice pre-filled with [`seed_demo`].
    pub fn demo() -> Result<Self> {
        let mut store = MemoryStore::new();
        seed_demo(&mut store)?;
        Ok(Practice::in_memory(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notizia_engine::Query;

    #[test]
    fn test_demo_practice_has_rows() {
        let practice = Practice::demo().unwrap();
        let report = practice.report(&Query::new()).unwrap();

        assert_eq!(report.result.total_sessions, 10);
        assert_eq!(report.result.closed_cases, 3);
        assert_eq!(report.result.undated_sessions, 0);
    }
}
