use notizia_types::{Row, newest_first};
use rusqlite::Connection;

use super::{case, client, session};
use crate::Result;

/// Inner joins drop sessions whose case or client is gone.
pub fn list_expanded(conn: &Connection) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {}, {}, {}
        FROM sessions s
        JOIN cases c ON c.id = s.case_id
        JOIN clients cl ON cl.id = c.client_id
        "#,
        session::COLUMNS,
        case::COLUMNS,
        client::COLUMNS
    ))?;

    let mut rows = stmt
        .query_map([], |row| {
            Ok(Row {
                session: session::from_row(row, 0)?,
                case: case::from_row(row, session::WIDTH)?,
                client: client::from_row(row, session::WIDTH + case::WIDTH)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
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
