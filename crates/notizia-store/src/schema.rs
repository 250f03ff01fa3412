use notizia_types::CaseStatus;
use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when changing table definitions, add a migration step)
//
// History:
// - 1: clients/cases/sessions, free-form case status
// - 2: clients.anamnesis (JSON text), case status normalized to open/resolved/dropped
pub const SCHEMA_VERSION: i32 = 2;

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    match current_version {
        0 => {
            tracing::debug!(version = SCHEMA_VERSION, "creating database schema");
            create_tables(conn)?;
        }
        1 => migrate_v1_to_v2(conn)?,
        SCHEMA_VERSION => {}
        newer => {
            return Err(Error::Schema(format!(
                "database schema version {} is newer than supported version {}",
                newer, SCHEMA_VERSION
            )));
        }
    }

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            gender TEXT,
            age INTEGER,
            anamnesis TEXT
        );

        CREATE TABLE IF NOT EXISTS cases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id INTEGER NOT NULL,
            problem_category TEXT NOT NULL DEFAULT 'other',
            problem_text TEXT NOT NULL DEFAULT '',
            started_at TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'open',
            severity INTEGER,
            FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            case_id INTEGER NOT NULL,
            started_at TEXT NOT NULL,
            duration_min INTEGER,
            method TEXT NOT NULL DEFAULT 'other',
            ease_hypnosis INTEGER,
            sud_before INTEGER,
            sud_after INTEGER,
            emotional_release TEXT,
            insights TEXT,
            notes TEXT,
            FOREIGN KEY (case_id) REFERENCES cases(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_cases_client ON cases(client_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_case ON sessions(case_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_started ON sessions(started_at DESC);
        "#,
    )?;
    Ok(())
}

fn migrate_v1_to_v2(conn: &Connection) -> Result<()> {
    tracing::info!(from = 1, to = 2, "migrating database schema");

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("ALTER TABLE clients ADD COLUMN anamnesis TEXT;")?;

    let legacy: Vec<(i64, Option<String>)> = {
        let mut stmt = tx.prepare("SELECT id, status FROM cases")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<std::result::Result<_, _>>()?
    };

    let mut changed = 0;
    for (id, raw) in legacy {
        let status = CaseStatus::from_legacy(raw.as_deref().unwrap_or_default());
        if raw.as_deref() != Some(status.as_str()) {
            tx.execute(
                "UPDATE cases SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id],
            )?;
            changed += 1;
        }
    }
    tx.commit()?;

    tracing::info!(normalized = changed, "case statuses migrated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_v1(conn: &Connection) {
        conn.execute_batch(
            r#"
            CREATE TABLE clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                gender TEXT,
                age INTEGER
            );
            CREATE TABLE cases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER NOT NULL,
                problem_category TEXT NOT NULL DEFAULT 'other',
                problem_text TEXT NOT NULL DEFAULT '',
                started_at TEXT NOT NULL,
                status TEXT,
                severity INTEGER,
                FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE
            );
            CREATE TABLE sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_id INTEGER NOT NULL,
                started_at TEXT NOT NULL,
                duration_min INTEGER,
                method TEXT NOT NULL DEFAULT 'other',
                ease_hypnosis INTEGER,
                sud_before INTEGER,
                sud_after INTEGER,
                emotional_release TEXT,
                insights TEXT,
                notes TEXT,
                FOREIGN KEY (case_id) REFERENCES cases(id) ON DELETE CASCADE
            );
            INSERT INTO clients (name) VALUES ('Anna');
            INSERT INTO cases (client_id, started_at, status) VALUES
                (1, '2024-01-01', 'Erledigt'),
                (1, '2024-02-01', NULL),
                (1, '2024-03-01', 'paused'),
                (1, '2024-04-01', 'open');
            PRAGMA user_version = 1;
            "#,
        )
        .unwrap();
    }

    #[test]
    fn test_fresh_database_gets_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_v1_statuses_are_normalized() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1(&conn);
        init_schema(&conn).unwrap();

        let mut stmt = conn.prepare("SELECT status FROM cases ORDER BY id").unwrap();
        let statuses: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(statuses, vec!["resolved", "open", "dropped", "open"]);

        let anamnesis: Option<String> = conn
            .query_row("SELECT anamnesis FROM clients WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(anamnesis, None);
    }

    #[test]
    fn test_newer_version_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();

        let err = init_schema(&conn).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
