use notizia_types::{
    Case, CasePatch, CaseStatus, Client, NewCase, NewClient, NewSession, Row, Session,
    SessionPatch, newest_first, validate_client_name,
};

use crate::{Error, Result, Storage};

/// Volatile store owning its collections and id counters.
///
/// Used for tests and the demo practice; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    clients: Vec<Client>,
    cases: Vec<Case>,
    sessions: Vec<Session>,
    last_client_id: i64,
    last_case_id: i64,
    last_session_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn list_clients(&self) -> Result<Vec<Client>> {
        let mut clients = self.clients.clone();
        clients.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(clients)
    }

    fn get_client(&self, id: i64) -> Result<Option<Client>> {
        Ok(self.clients.iter().find(|c| c.id == id).cloned())
    }

    fn add_client(&mut self, client: NewClient) -> Result<Client> {
        let name = validate_client_name(&client.name)?;
        self.last_client_id += 1;
        let created = Client {
            id: self.last_client_id,
            name,
            gender: client.gender,
            age: client.age,
            anamnesis: client.anamnesis,
        };
        self.clients.push(created.clone());
        Ok(created)
    }

    fn update_client(&mut self, id: i64, client: NewClient) -> Result<Client> {
        let name = validate_client_name(&client.name)?;
        let existing = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::not_found("client", id))?;

        existing.name = name;
        existing.gender = client.gender;
        existing.age = client.age;
        existing.anamnesis = client.anamnesis;
        Ok(existing.clone())
    }

    fn delete_client(&mut self, id: i64) -> Result<()> {
        if !self.clients.iter().any(|c| c.id == id) {
            return Err(Error::not_found("client", id));
        }

        let case_ids: Vec<i64> = self
            .cases
            .iter()
            .filter(|c| c.client_id == id)
            .map(|c| c.id)
            .collect();
        self.sessions.retain(|s| !case_ids.contains(&s.case_id));
        self.cases.retain(|c| c.client_id != id);
        self.clients.retain(|c| c.id != id);
        Ok(())
    }

    fn list_cases(&self, client_id: i64) -> Result<Vec<Case>> {
        let mut cases: Vec<Case> = self
            .cases
            .iter()
            .filter(|c| c.client_id == client_id)
            .cloned()
            .collect();
        cases.sort_by(|a, b| newest_first(&a.started_at, a.id, &b.started_at, b.id));
        Ok(cases)
    }

    fn get_case(&self, id: i64) -> Result<Option<Case>> {
        Ok(self.cases.iter().find(|c| c.id == id).cloned())
    }

    fn add_case(&mut self, case: NewCase) -> Result<Case> {
        if !self.clients.iter().any(|c| c.id == case.client_id) {
            return Err(Error::not_found("client", case.client_id));
        }

        self.last_case_id += 1;
        let created = Case {
            id: self.last_case_id,
            client_id: case.client_id,
            problem_category: case.problem_category,
            problem_text: case.problem_text,
            started_at: case.started_at,
            status: case.status.unwrap_or(CaseStatus::Open),
            severity: case.severity,
        };
        self.cases.push(created.clone());
        Ok(created)
    }

    fn update_case(&mut self, patch: CasePatch) -> Result<Case> {
        let existing = self
            .cases
            .iter_mut()
            .find(|c| c.id == patch.id)
            .ok_or(Error::not_found("case", patch.id))?;

        patch.apply(existing);
        Ok(existing.clone())
    }

    fn delete_case(&mut self, id: i64) -> Result<()> {
        if !self.cases.iter().any(|c| c.id == id) {
            return Err(Error::not_found("case", id));
        }

        self.sessions.retain(|s| s.case_id != id);
        self.cases.retain(|c| c.id != id);
        Ok(())
    }

    fn list_sessions(&self, case_id: i64) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| s.case_id == case_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| newest_first(&a.started_at, a.id, &b.started_at, b.id));
        Ok(sessions)
    }

    fn add_session(&mut self, session: NewSession) -> Result<Session> {
        if !self.cases.iter().any(|c| c.id == session.case_id) {
            return Err(Error::not_found("case", session.case_id));
        }

        self.last_session_id += 1;
        let created = session.into_session(self.last_session_id);
        self.sessions.push(created.clone());
        Ok(created)
    }

    fn update_session(&mut self, id: i64, patch: SessionPatch) -> Result<Session> {
        let existing = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::not_found("session", id))?;

        patch.apply(existing);
        Ok(existing.clone())
    }

    fn delete_session(&mut self, id: i64) -> Result<()> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(Error::not_found("session", id));
        }
        Ok(())
    }

    fn list_all_sessions_expanded(&self) -> Result<Vec<Row>> {
        let mut rows: Vec<Row> = self
            .sessions
            .iter()
            .filter_map(|session| {
                let case = self.cases.iter().find(|c| c.id == session.case_id)?;
                let client = self.clients.iter().find(|c| c.id == case.client_id)?;
                Some(Row {
                    session: session.clone(),
                    case: case.clone(),
                    client: client.clone(),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            newest_first(
                &a.session.started_at,
                a.session.id,
                &b.session.started_at,
                b.session.id,
            )
        });
        Ok(rows)
    }
}
