use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

/// Insert a provider profile. The id is the doctor account's id, so it
/// is supplied by the caller rather than assigned by the database.
pub fn insert_provider(conn: &Connection, prov: &Provider) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO providers (id, name, specialty) VALUES (?1, ?2, ?3)",
        params![prov.id, prov.name, prov.specialty],
    )?;
    Ok(())
}

pub fn get_provider(conn: &Connection, id: i64) -> Result<Option<Provider>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, name, specialty FROM providers WHERE id = ?1",
        params![id],
        |row| {
            Ok(Provider {
                id: row.get(0)?,
                name: row.get(1)?,
                specialty: row.get(2)?,
            })
        },
    );
    match result {
        Ok(prov) => Ok(Some(prov)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_providers(conn: &Connection) -> Result<Vec<Provider>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, specialty FROM providers ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Provider {
            id: row.get(0)?,
            name: row.get(1)?,
            specialty: row.get(2)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
