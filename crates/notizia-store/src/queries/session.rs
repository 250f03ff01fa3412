use notizia_types::{Method, NewSession, Session, SessionPatch, newest_first};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{Error, Result};

pub const COLUMNS: &str = "s.id, s.case_id, s.started_at, s.duration_min, s.method, \
    s.ease_hypnosis, s.sud_before, s.sud_after, s.emotional_release, s.insights, s.notes";
pub const WIDTH: usize = 11;

/// Read a session starting at column `offset`.
///
/// Unknown method codes read back as `other`.
pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Session> {
    let method: Option<String> = row.get(offset + 4)?;

    Ok(Session {
        id: row.get(offset)?,
        case_id: row.get(offset + 1)?,
        started_at: row.get(offset + 2)?,
        duration_min: row.get(offset + 3)?,
        method: method
            .and_then(|m| m.parse::<Method>().ok())
            .unwrap_or(Method::Other),
        ease_hypnosis: row.get(offset + 5)?,
        sud_before: row.get(offset + 6)?,
        sud_after: row.get(offset + 7)?,
        emotional_release: row.get(offset + 8)?,
        insights: row.get(offset + 9)?,
        notes: row.get(offset + 10)?,
    })
}

pub fn insert(conn: &Connection, session: &NewSession) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO sessions (case_id, started_at, duration_min, method, ease_hypnosis,
                              sud_before, sud_after, emotional_release, insights, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            session.case_id,
            &session.started_at,
            session.duration_min,
            session.method.as_str(),
            session.ease_hypnosis,
            session.sud_before,
            session.sud_after,
            &session.emotional_release,
            &session.insights,
            &session.notes
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, patch: &SessionPatch) -> Result<()> {
    let changed = conn.execute(
        r#"
        UPDATE sessions SET
            started_at = COALESCE(?2, started_at),
            duration_min = COALESCE(?3, duration_min),
            method = COALESCE(?4, method),
            sud_before = COALESCE(?5, sud_before),
            sud_after = COALESCE(?6, sud_after),
            emotional_release = COALESCE(?7, emotional_release),
            insights = COALESCE(?8, insights),
            notes = COALESCE(?9, notes)
        WHERE id = ?1
        "#,
        params![
            id,
            &patch.started_at,
            patch.duration_min,
            patch.method.map(|m| m.as_str()),
            patch.sud_before,
            patch.sud_after,
            &patch.emotional_release,
            &patch.insights,
            &patch.notes
        ],
    )?;

    if changed == 0 {
        return Err(Error::not_found("session", id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(Error::not_found("session", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Session>> {
    let result = conn
        .query_row(
            &format!("SELECT {} FROM sessions s WHERE s.id = ?1", COLUMNS),
            [id],
            |row| from_row(row, 0),
        )
        .optional()?;

    Ok(result)
}

pub fn list_for_case(conn: &Connection, case_id: i64) -> Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {}
        FROM sessions s
        WHERE s.case_id = ?1
        "#,
        COLUMNS
    ))?;

    let mut sessions = stmt
        .query_map([case_id], |row| from_row(row, 0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    sessions.sort_by(|a, b| newest_first(&a.started_at, a.id, &b.started_at, b.id));

    Ok(sessions)
}
