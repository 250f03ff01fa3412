//! Row fixtures.
//!
//! Every builder starts from a plain row (coaching session, open case with
//! problem `other`, client without gender or age) so a test only spells
//! out the fields it is about.

use notizia_types::{
    Case, CaseStatus, Client, Gender, Method, NewSession, ProblemCategory, Row,
};

pub const DEFAULT_STARTED_AT: &str = "2025-01-06T10:00:00Z";

/// Builder for a single [`Row`].
///
/// Case and client ids default to the session id, i.e. every row belongs to
/// its own case and client unless told otherwise.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    pub fn new(session_id: i64) -> Self {
        let session = NewSession::new(session_id, DEFAULT_STARTED_AT, Method::Coaching)
            .into_session(session_id);
        let case = Case {
            id: session_id,
            client_id: session_id,
            problem_category: ProblemCategory::Other,
            problem_text: String::new(),
            started_at: DEFAULT_STARTED_AT.to_string(),
            status: CaseStatus::Open,
            severity: None,
        };
        let client = Client {
            id: session_id,
            name: format!("Client {}", session_id),
            gender: None,
            age: None,
            anamnesis: None,
        };

        Self {
            row: Row {
                session,
                case,
                client,
            },
        }
    }

    pub fn client(mut self, id: i64) -> Self {
        self.row.client.id = id;
        self.row.case.client_id = id;
        self
    }

    pub fn client_name(mut self, name: &str) -> Self {
        self.row.client.name = name.to_string();
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.row.client.gender = Some(gender);
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.row.client.age = Some(age);
        self
    }

    pub fn case(mut self, id: i64) -> Self {
        self.row.case.id = id;
        self.row.session.case_id = id;
        self
    }

    pub fn problem(mut self, problem: ProblemCategory) -> Self {
        self.row.case.problem_category = problem;
        self
    }

    pub fn problem_text(mut self, text: &str) -> Self {
        self.row.case.problem_text = text.to_string();
        self
    }

    pub fn status(mut self, status: CaseStatus) -> Self {
        self.row.case.status = status;
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.row.session.method = method;
        self
    }

    pub fn started_at(mut self, started_at: &str) -> Self {
        self.row.session.started_at = started_at.to_string();
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.row.session.duration_min = Some(minutes);
        self
    }

    pub fn sud(self, before: u8, after: u8) -> Self {
        self.sud_before(before).sud_after(after)
    }

    pub fn sud_before(mut self, value: u8) -> Self {
        self.row.session.sud_before = Some(value);
        self
    }

    pub fn sud_after(mut self, value: u8) -> Self {
        self.row.session.sud_after = Some(value);
        self
    }

    pub fn build(self) -> Row {
        self.row
    }
}

/// A small practice: two clients, three cases, seven sessions.
///
/// - Anna (w, 34): panic case, resolved, 3 sessions (2 coaching, 1 other)
/// - Anna: sleep case, open, 1 klassische_hypnose session
/// - Ben (m, 61): overweight case, dropped, 3 aufloesende_hypnose sessions,
///   one of them with an unparseable date
pub fn sample_rows() -> Vec<Row> {
    vec![
        RowBuilder::new(1)
            .client(1)
            .client_name("Anna")
            .gender(Gender::W)
            .age(34)
            .case(1)
            .problem(ProblemCategory::Panic)
            .status(CaseStatus::Resolved)
            .method(Method::Coaching)
            .started_at("2024-12-31T09:00:00Z")
            .duration(60)
            .sud(8, 4)
            .build(),
        RowBuilder::new(2)
            .client(1)
            .client_name("Anna")
            .gender(Gender::W)
            .age(34)
            .case(1)
            .problem(ProblemCategory::Panic)
            .status(CaseStatus::Resolved)
            .method(Method::Coaching)
            .started_at("2025-01-07T09:00:00Z")
            .duration(50)
            .sud(6, 2)
            .build(),
        RowBuilder::new(3)
            .client(1)
            .client_name("Anna")
            .gender(Gender::W)
            .age(34)
            .case(1)
            .problem(ProblemCategory::Panic)
            .status(CaseStatus::Resolved)
            .method(Method::Other)
            .started_at("2025-01-14T09:00:00Z")
            .build(),
        RowBuilder::new(4)
            .client(1)
            .client_name("Anna")
            .gender(Gender::W)
            .age(34)
            .case(2)
            .problem(ProblemCategory::Sleep)
            .method(Method::KlassischeHypnose)
            .started_at("2025-02-03T18:00:00Z")
            .duration(90)
            .build(),
        RowBuilder::new(5)
            .client(2)
            .client_name("Ben")
            .gender(Gender::M)
            .age(61)
            .case(3)
            .problem(ProblemCategory::Overweight)
            .status(CaseStatus::Dropped)
            .method(Method::AufloesendeHypnose)
            .started_at("2025-02-04T08:00:00Z")
            .duration(75)
            .sud(9, 9)
            .build(),
        RowBuilder::new(6)
            .client(2)
            .client_name("Ben")
            .gender(Gender::M)
            .age(61)
            .case(3)
            .problem(ProblemCategory::Overweight)
            .status(CaseStatus::Dropped)
            .method(Method::AufloesendeHypnose)
            .started_at("2025-02-11T08:00:00Z")
            .build(),
        RowBuilder::new(7)
            .client(2)
            .client_name("Ben")
            .gender(Gender::M)
            .age(61)
            .case(3)
            .problem(ProblemCategory::Overweight)
            .status(CaseStatus::Dropped)
            .method(Method::AufloesendeHypnose)
            .started_at("sometime in March")
            .build(),
    ]
}
