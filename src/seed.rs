//! Bootstrap seeding.
//!
//! Idempotently ensures the fixed admin account, a sample patient, and
//! the ten-doctor roster exist. Keyed by handle with skip-if-exists
//! semantics, so reruns are safe and change nothing once all handles
//! are present. Doctor and admin accounts are only ever created here —
//! self-registration is patient-only.

use rusqlite::Connection;

use crate::auth::hash_password;
use crate::db::repository::{find_account_by_handle, insert_account, insert_provider};
use crate::db::DatabaseError;
use crate::models::*;

/// Seed password shared by all bootstrap accounts. Demo fixture.
const SEED_PASSWORD: &str = "123";

const DOCTORS: &[(&str, &str, &str)] = &[
    ("dr_vanhung", "Bác sĩ Nguyễn Văn Hùng", "Nhi khoa"),
    ("dr_thaonguyen", "Bác sĩ Nguyễn Thị Thu Thảo", "Nội tổng quát"),
    ("dr_kiutram", "Bác sĩ Lê Ngọc Kiều Trâm", "Da liễu"),
    ("dr_tuananh", "Bác sĩ Lê Tuấn Anh", "Răng - Hàm - Mặt"),
    ("dr_nhuquynh", "Bác sĩ Trần Như Quỳnh", "Ngoại tổng quát"),
    ("dr_quanghai", "Bác sĩ Trần Quang Hải", "Tai Mũi Họng"),
    ("dr_maichi", "Bác sĩ Nguyễn Mai Chi", "Mắt"),
    ("dr_vanthanh", "Bác sĩ Hoàng Văn Thanh", "Cơ Xương Khớp"),
    ("dr_phuonglinh", "Bác sĩ Phạm Phương Linh", "Sản Phụ khoa"),
    ("dr_minhduc", "Bác sĩ Đỗ Minh Đức", "Tiêu Hóa"),
];

/// Ensure all bootstrap accounts exist. Returns the number of accounts
/// created on this run (0 when everything is already present).
pub fn ensure_seed_data(conn: &Connection) -> Result<usize, DatabaseError> {
    let mut created = 0;

    if find_account_by_handle(conn, "admin")?.is_none() {
        insert_account(
            conn,
            "admin",
            &hash_password(SEED_PASSWORD),
            Some("Quản trị viên"),
            Role::Admin,
        )?;
        created += 1;
    }

    if find_account_by_handle(conn, "patient1")?.is_none() {
        insert_account(
            conn,
            "patient1",
            &hash_password(SEED_PASSWORD),
            Some("Ngô Nhật Tuấn"),
            Role::Patient,
        )?;
        created += 1;
    }

    for (handle, name, specialty) in DOCTORS {
        if find_account_by_handle(conn, handle)?.is_some() {
            continue;
        }
        let account = insert_account(
            conn,
            handle,
            &hash_password(SEED_PASSWORD),
            Some(name),
            Role::Doctor,
        )?;
        insert_provider(
            conn,
            &Provider {
                id: account.id,
                name: name.to_string(),
                specialty: Some(specialty.to_string()),
            },
        )?;
        created += 1;
    }

    if created > 0 {
        tracing::info!(created, "seed accounts created");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{count_accounts, get_all_providers};

    #[test]
    fn seed_creates_full_roster() {
        let conn = open_memory_database().unwrap();
        let created = ensure_seed_data(&conn).unwrap();
        assert_eq!(created, 12); // admin + patient1 + 10 doctors
        assert_eq!(count_accounts(&conn).unwrap(), 12);
        assert_eq!(get_all_providers(&conn).unwrap().len(), 10);
    }

    #[test]
    fn reseed_is_a_noop() {
        let conn = open_memory_database().unwrap();
        ensure_seed_data(&conn).unwrap();
        let created = ensure_seed_data(&conn).unwrap();
        assert_eq!(created, 0);
        assert_eq!(count_accounts(&conn).unwrap(), 12);
        assert_eq!(get_all_providers(&conn).unwrap().len(), 10);
    }

    #[test]
    fn seed_fills_gaps_only() {
        let conn = open_memory_database().unwrap();
        insert_account(&conn, "admin", "hash", None, Role::Admin).unwrap();
        let created = ensure_seed_data(&conn).unwrap();
        assert_eq!(created, 11);
    }

    #[test]
    fn seeded_roles_are_correct() {
        let conn = open_memory_database().unwrap();
        ensure_seed_data(&conn).unwrap();
        let admin = find_account_by_handle(&conn, "admin").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        let doc = find_account_by_handle(&conn, "dr_vanhung").unwrap().unwrap();
        assert_eq!(doc.role, Role::Doctor);
        // Provider id mirrors the doctor account id
        let providers = get_all_providers(&conn).unwrap();
        assert!(providers.iter().any(|p| p.id == doc.id));
    }
}
