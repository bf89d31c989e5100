use std::str::FromStr;

use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, Option<String>, String)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn build_account(
    (id, handle, credential_hash, display_name, role): (i64, String, String, Option<String>, String),
) -> Result<Account, DatabaseError> {
    Ok(Account {
        id,
        handle,
        credential_hash,
        display_name,
        role: Role::from_str(&role)?,
    })
}

pub fn insert_account(
    conn: &Connection,
    handle: &str,
    credential_hash: &str,
    display_name: Option<&str>,
    role: Role,
) -> Result<Account, DatabaseError> {
    conn.execute(
        "INSERT INTO accounts (handle, credential_hash, display_name, role)
         VALUES (?1, ?2, ?3, ?4)",
        params![handle, credential_hash, display_name, role.as_str()],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Account {
        id,
        handle: handle.to_string(),
        credential_hash: credential_hash.to_string(),
        display_name: display_name.map(|s| s.to_string()),
        role,
    })
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Option<Account>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, handle, credential_hash, display_name, role
         FROM accounts WHERE id = ?1",
        params![id],
        account_from_row,
    );
    match result {
        Ok(raw) => Ok(Some(build_account(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_account_by_handle(
    conn: &Connection,
    handle: &str,
) -> Result<Option<Account>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, handle, credential_hash, display_name, role
         FROM accounts WHERE handle = ?1",
        params![handle],
        account_from_row,
    );
    match result {
        Ok(raw) => Ok(Some(build_account(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_accounts(conn: &Connection) -> Result<Vec<Account>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, handle, credential_hash, display_name, role
         FROM accounts ORDER BY id",
    )?;
    let rows = stmt.query_map([], account_from_row)?;
    rows.map(|r| build_account(r?)).collect()
}

pub fn count_accounts(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn insert_and_fetch_account() {
        let conn = open_memory_database().unwrap();
        let created =
            insert_account(&conn, "p1", "hash", Some("Patient One"), Role::Patient).unwrap();
        let fetched = get_account(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.handle, "p1");
        assert_eq!(fetched.role, Role::Patient);
        assert_eq!(fetched.display_name.as_deref(), Some("Patient One"));
    }

    #[test]
    fn find_by_handle() {
        let conn = open_memory_database().unwrap();
        insert_account(&conn, "admin", "hash", None, Role::Admin).unwrap();
        assert!(find_account_by_handle(&conn, "admin").unwrap().is_some());
        assert!(find_account_by_handle(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_handle_is_unique_violation() {
        let conn = open_memory_database().unwrap();
        insert_account(&conn, "p1", "hash", None, Role::Patient).unwrap();
        let err = insert_account(&conn, "p1", "hash", None, Role::Patient).unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(count_accounts(&conn).unwrap(), 1);
    }

    #[test]
    fn get_missing_account_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_account(&conn, 999).unwrap().is_none());
    }
}
