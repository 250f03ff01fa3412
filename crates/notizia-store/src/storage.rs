use notizia_types::{
    Case, CasePatch, Client, NewCase, NewClient, NewSession, Row, Session, SessionPatch,
};

use crate::Result;

/// Record store for clients, their cases and the sessions of each case.
///
/// Ordering contract shared by every backend:
/// - clients: newest (highest id) first
/// - cases and sessions: `started_at` descending, ties by id descending
/// - expanded rows: session `started_at` descending, ties by session id descending
///
/// Updates and deletes of unknown ids fail with [`crate::Error::NotFound`].
pub trait Storage {
    fn list_clients(&self) -> Result<Vec<Client>>;
    fn get_client(&self, id: i64) -> Result<Option<Client>>;
    fn add_client(&mut self, client: NewClient) -> Result<Client>;
    fn update_client(&mut self, id: i64, client: NewClient) -> Result<Client>;
    /// Removes the client together with its cases and their sessions.
    fn delete_client(&mut self, id: i64) -> Result<()>;

    fn list_cases(&self, client_id: i64) -> Result<Vec<Case>>;
    fn get_case(&self, id: i64) -> Result<Option<Case>>;
    fn add_case(&mut self, case: NewCase) -> Result<Case>;
    fn update_case(&mut self, patch: CasePatch) -> Result<Case>;
    /// Removes the case together with its sessions.
    fn delete_case(&mut self, id: i64) -> Result<()>;

    fn list_sessions(&self, case_id: i64) -> Result<Vec<Session>>;
    fn add_session(&mut self, session: NewSession) -> Result<Session>;
    fn update_session(&mut self, id: i64, patch: SessionPatch) -> Result<Session>;
    fn delete_session(&mut self, id: i64) -> Result<()>;

    /// Every session joined with its case and client.
    ///
    /// Sessions whose case or client no longer exists are skipped.
    fn list_all_sessions_expanded(&self) -> Result<Vec<Row>>;
}
