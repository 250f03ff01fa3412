use notizia_types::{Anamnesis, Client, Gender, NewClient};
use rusqlite::{Connection, OptionalExtension, params, types::Type};

use crate::{Error, Result};

pub const COLUMNS: &str = "cl.id, cl.name, cl.gender, cl.age, cl.anamnesis";

/// Read a client starting at column `offset`.
///
/// Unknown gender codes read back as absent.
pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Client> {
    let gender: Option<String> = row.get(offset + 2)?;
    let anamnesis: Option<String> = row.get(offset + 4)?;
    let anamnesis = anamnesis
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| serde_json::from_str::<Anamnesis>(&raw))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(offset + 4, Type::Text, Box::new(e)))?;

    Ok(Client {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        gender: gender.and_then(|g| g.parse::<Gender>().ok()),
        age: row.get(offset + 3)?,
        anamnesis,
    })
}

fn anamnesis_json(client: &NewClient) -> Result<Option<String>> {
    client
        .anamnesis
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(Error::from)
}

pub fn insert(conn: &Connection, client: &NewClient, name: &str) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO clients (name, gender, age, anamnesis)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            name,
            client.gender.map(|g| g.as_str()),
            client.age,
            anamnesis_json(client)?
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, client: &NewClient, name: &str) -> Result<()> {
    let changed = conn.execute(
        r#"
        UPDATE clients
        SET name = ?2, gender = ?3, age = ?4, anamnesis = ?5
        WHERE id = ?1
        "#,
        params![
            id,
            name,
            client.gender.map(|g| g.as_str()),
            client.age,
            anamnesis_json(client)?
        ],
    )?;

    if changed == 0 {
        return Err(Error::not_found("client", id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(Error::not_found("client", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Client>> {
    let result = conn
        .query_row(
            &format!("SELECT {} FROM clients cl WHERE cl.id = ?1", COLUMNS),
            [id],
            |row| from_row(row, 0),
        )
        .optional()?;

    Ok(result)
}

pub fn list(conn: &Connection) -> Result<Vec<Client>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM clients cl ORDER BY cl.id DESC",
        COLUMNS
    ))?;

    let clients = stmt
        .query_map([], |row| from_row(row, 0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(clients)
}
