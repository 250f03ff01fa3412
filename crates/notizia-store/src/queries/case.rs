use notizia_types::{Case, CasePatch, CaseStatus, NewCase, ProblemCategory, newest_first};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{Error, Result};

pub const COLUMNS: &str =
    "c.id, c.client_id, c.problem_category, c.problem_text, c.started_at, c.status, c.severity";
pub const WIDTH: usize = 7;

/// Read a case starting at column `offset`.
///
/// Unknown categories read back as `other`; statuses go through the legacy mapping.
pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Case> {
    let category: Option<String> = row.get(offset + 2)?;
    let status: Option<String> = row.get(offset + 5)?;

    Ok(Case {
        id: row.get(offset)?,
        client_id: row.get(offset + 1)?,
        problem_category: category
            .and_then(|c| c.parse::<ProblemCategory>().ok())
            .unwrap_or_default(),
        problem_text: row.get::<_, Option<String>>(offset + 3)?.unwrap_or_default(),
        started_at: row.get(offset + 4)?,
        status: CaseStatus::from_legacy(status.as_deref().unwrap_or_default()),
        severity: row.get(offset + 6)?,
    })
}

pub fn insert(conn: &Connection, case: &NewCase) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO cases (client_id, problem_category, problem_text, started_at, status, severity)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            case.client_id,
            case.problem_category.as_str(),
            &case.problem_text,
            &case.started_at,
            case.status.unwrap_or_default().as_str(),
            case.severity
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, patch: &CasePatch) -> Result<()> {
    let changed = conn.execute(
        r#"
        UPDATE cases SET
            problem_category = COALESCE(?2, problem_category),
            problem_text = COALESCE(?3, problem_text),
            started_at = COALESCE(?4, started_at),
            status = COALESCE(?5, status),
            severity = COALESCE(?6, severity)
        WHERE id = ?1
        "#,
        params![
            patch.id,
            patch.problem_category.map(|c| c.as_str()),
            &patch.problem_text,
            &patch.started_at,
            patch.status.map(|s| s.as_str()),
            patch.severity
        ],
    )?;

    if changed == 0 {
        return Err(Error::not_found("case", patch.id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM cases WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(Error::not_found("case", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Case>> {
    let result = conn
        .query_row(
            &format!("SELECT {} FROM cases c WHERE c.id = ?1", COLUMNS),
            [id],
            |row| from_row(row, 0),
        )
        .optional()?;

    Ok(result)
}

pub fn list_for_client(conn: &Connection, client_id: i64) -> Result<Vec<Case>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {}
        FROM cases c
        WHERE c.client_id = ?1
        "#,
        COLUMNS
    ))?;

    let mut cases = stmt
        .query_map([client_id], |row| from_row(row, 0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    cases.sort_by(|a, b| newest_first(&a.started_at, a.id, &b.started_at, b.id));

    Ok(cases)
}
