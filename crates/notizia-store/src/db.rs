use std::path::Path;

use notizia_types::{
    Case, CasePatch, Client, NewCase, NewClient, NewSession, Row, Session, SessionPatch,
    validate_client_name,
};
use rusqlite::Connection;

use crate::queries::{case, client, row, session};
use crate::schema::init_schema;
use crate::{Error, Result, Storage};

/// SQLite-backed store.
///
/// Opening a file creates it at the current schema version, migrates an
/// older version in place and refuses a newer one.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        init_schema(&conn)?;
        tracing::debug!(path = %db_path.display(), "database opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn require<T>(found: Option<T>, kind: &'static str, id: i64) -> Result<T> {
        found.ok_or(Error::not_found(kind, id))
    }
}

impl Storage for Database {
    fn list_clients(&self) -> Result<Vec<Client>> {
        client::list(&self.conn)
    }

    fn get_client(&self, id: i64) -> Result<Option<Client>> {
        client::get(&self.conn, id)
    }

    fn add_client(&mut self, new_client: NewClient) -> Result<Client> {
        let name = validate_client_name(&new_client.name)?;
        let id = client::insert(&self.conn, &new_client, &name)?;
        Self::require(client::get(&self.conn, id)?, "client", id)
    }

    fn update_client(&mut self, id: i64, new_client: NewClient) -> Result<Client> {
        let name = validate_client_name(&new_client.name)?;
        client::update(&self.conn, id, &new_client, &name)?;
        Self::require(client::get(&self.conn, id)?, "client", id)
    }

    fn delete_client(&mut self, id: i64) -> Result<()> {
        client::delete(&self.conn, id)
    }

    fn list_cases(&self, client_id: i64) -> Result<Vec<Case>> {
        case::list_for_client(&self.conn, client_id)
    }

    fn get_case(&self, id: i64) -> Result<Option<Case>> {
        case::get(&self.conn, id)
    }

    fn add_case(&mut self, new_case: NewCase) -> Result<Case> {
        if client::get(&self.conn, new_case.client_id)?.is_none() {
            return Err(Error::not_found("client", new_case.client_id));
        }
        let id = case::insert(&self.conn, &new_case)?;
        Self::require(case::get(&self.conn, id)?, "case", id)
    }

    fn update_case(&mut self, patch: CasePatch) -> Result<Case> {
        case::update(&self.conn, &patch)?;
        Self::require(case::get(&self.conn, patch.id)?, "case", patch.id)
    }

    fn delete_case(&mut self, id: i64) -> Result<()> {
        case::delete(&self.conn, id)
    }

    fn list_sessions(&self, case_id: i64) -> Result<Vec<Session>> {
        session::list_for_case(&self.conn, case_id)
    }

    fn add_session(&mut self, new_session: NewSession) -> Result<Session> {
        if case::get(&self.conn, new_session.case_id)?.is_none() {
            return Err(Error::not_found("case", new_session.case_id));
        }
        let id = session::insert(&self.conn, &new_session)?;
        Self::require(session::get(&self.conn, id)?, "session", id)
    }

    fn update_session(&mut self, id: i64, patch: SessionPatch) -> Result<Session> {
        session::update(&self.conn, id, &patch)?;
        Self::require(session::get(&self.conn, id)?, "session", id)
    }

    fn delete_session(&mut self, id: i64) -> Result<()> {
        session::delete(&self.conn, id)
    }

    fn list_all_sessions_expanded(&self) -> Result<Vec<Row>> {
        row::list_expanded(&self.conn)
    }
}
