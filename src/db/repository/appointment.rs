use std::str::FromStr;

use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn appointment_from_row(
    row: &Row<'_>,
) -> rusqlite::Result<(i64, i64, i64, String, Option<String>, String)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn build_appointment(
    (id, patient_id, provider_id, time, note, status): (i64, i64, i64, String, Option<String>, String),
) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id,
        patient_id,
        provider_id,
        time,
        note,
        status: AppointmentStatus::from_str(&status)?,
    })
}

pub fn insert_appointment(
    conn: &Connection,
    patient_id: i64,
    provider_id: i64,
    time: &str,
    note: Option<&str>,
) -> Result<Appointment, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, provider_id, time, note, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient_id,
            provider_id,
            time,
            note,
            AppointmentStatus::Pending.as_str()
        ],
    )?;
    Ok(Appointment {
        id: conn.last_insert_rowid(),
        patient_id,
        provider_id,
        time: time.to_string(),
        note: note.map(|s| s.to_string()),
        status: AppointmentStatus::Pending,
    })
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, patient_id, provider_id, time, note, status
         FROM appointments WHERE id = ?1",
        params![id],
        appointment_from_row,
    );
    match result {
        Ok(raw) => Ok(Some(build_appointment(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Single-row status update. Callers have already validated the
/// transition; this only persists it.
pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "appointment".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// A patient's bookings, joined with the provider profile and a
/// has-record flag for the list view.
pub fn list_appointments_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.provider_id, a.time, a.note, a.status,
                p.name, p.specialty,
                EXISTS(SELECT 1 FROM medical_records r WHERE r.appointment_id = a.id)
         FROM appointments a
         JOIN providers p ON p.id = a.provider_id
         WHERE a.patient_id = ?1
         ORDER BY a.id",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok((
            appointment_from_row(row)?,
            row.get::<_, String>(6)?,
            row.get::<_, Option<String>>(7)?,
            row.get::<_, bool>(8)?,
        ))
    })?;
    rows.map(|r| {
        let (raw, provider_name, provider_specialty, has_record) = r?;
        Ok(AppointmentView {
            appointment: build_appointment(raw)?,
            patient_name: None,
            provider_name: Some(provider_name),
            provider_specialty,
            has_record,
        })
    })
    .collect()
}

/// A doctor's incoming bookings, joined with the patient's display
/// name (falling back to the handle) and a has-record flag.
pub fn list_appointments_for_provider(
    conn: &Connection,
    provider_id: i64,
) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.provider_id, a.time, a.note, a.status,
                COALESCE(u.display_name, u.handle),
                EXISTS(SELECT 1 FROM medical_records r WHERE r.appointment_id = a.id)
         FROM appointments a
         JOIN accounts u ON u.id = a.patient_id
         WHERE a.provider_id = ?1
         ORDER BY a.id",
    )?;
    let rows = stmt.query_map(params![provider_id], |row| {
        Ok((
            appointment_from_row(row)?,
            row.get::<_, String>(6)?,
            row.get::<_, bool>(7)?,
        ))
    })?;
    rows.map(|r| {
        let (raw, patient_name, has_record) = r?;
        Ok(AppointmentView {
            appointment: build_appointment(raw)?,
            patient_name: Some(patient_name),
            provider_name: None,
            provider_specialty: None,
            has_record,
        })
    })
    .collect()
}

pub fn get_all_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, provider_id, time, note, status
         FROM appointments ORDER BY id",
    )?;
    let rows = stmt.query_map([], appointment_from_row)?;
    rows.map(|r| build_appointment(r?)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{insert_account, insert_provider};

    fn seed_booking(conn: &Connection) -> (i64, i64, Appointment) {
        let patient = insert_account(conn, "p1", "h", Some("Pat One"), Role::Patient).unwrap();
        let doctor = insert_account(conn, "d1", "h", Some("Doc One"), Role::Doctor).unwrap();
        insert_provider(
            conn,
            &Provider {
                id: doctor.id,
                name: "Doc One".into(),
                specialty: Some("Pediatrics".into()),
            },
        )
        .unwrap();
        let ap = insert_appointment(conn, patient.id, doctor.id, "2025-01-01 10:00", None).unwrap();
        (patient.id, doctor.id, ap)
    }

    #[test]
    fn new_appointment_is_pending() {
        let conn = open_memory_database().unwrap();
        let (_, _, ap) = seed_booking(&conn);
        assert_eq!(ap.status, AppointmentStatus::Pending);
        let fetched = get_appointment(&conn, ap.id).unwrap().unwrap();
        assert_eq!(fetched.status, AppointmentStatus::Pending);
    }

    #[test]
    fn status_update_persists() {
        let conn = open_memory_database().unwrap();
        let (_, _, ap) = seed_booking(&conn);
        update_appointment_status(&conn, ap.id, AppointmentStatus::Accepted).unwrap();
        let fetched = get_appointment(&conn, ap.id).unwrap().unwrap();
        assert_eq!(fetched.status, AppointmentStatus::Accepted);
    }

    #[test]
    fn status_update_on_missing_row_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = update_appointment_status(&conn, 999, AppointmentStatus::Accepted).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn patient_view_joins_provider() {
        let conn = open_memory_database().unwrap();
        let (patient_id, _, _) = seed_booking(&conn);
        let views = list_appointments_for_patient(&conn, patient_id).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].provider_name.as_deref(), Some("Doc One"));
        assert_eq!(views[0].provider_specialty.as_deref(), Some("Pediatrics"));
        assert!(!views[0].has_record);
    }

    #[test]
    fn provider_view_joins_patient() {
        let conn = open_memory_database().unwrap();
        let (_, provider_id, _) = seed_booking(&conn);
        let views = list_appointments_for_provider(&conn, provider_id).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].patient_name.as_deref(), Some("Pat One"));
    }
}
