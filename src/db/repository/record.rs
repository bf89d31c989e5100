use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_record(
    conn: &Connection,
    appointment_id: i64,
    patient_id: i64,
    doctor_id: i64,
    diagnosis: &str,
    treatment: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<MedicalRecord, DatabaseError> {
    conn.execute(
        "INSERT INTO medical_records
         (appointment_id, patient_id, doctor_id, diagnosis, treatment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appointment_id,
            patient_id,
            doctor_id,
            diagnosis,
            treatment,
            created_at.to_rfc3339(),
        ],
    )?;
    Ok(MedicalRecord {
        id: conn.last_insert_rowid(),
        appointment_id,
        patient_id,
        doctor_id,
        diagnosis: diagnosis.to_string(),
        treatment: treatment.map(|s| s.to_string()),
        created_at,
    })
}

pub fn find_record_for_appointment(
    conn: &Connection,
    appointment_id: i64,
) -> Result<Option<MedicalRecord>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, appointment_id, patient_id, doctor_id, diagnosis, treatment, created_at
         FROM medical_records WHERE appointment_id = ?1",
        params![appointment_id],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        },
    );
    match result {
        Ok((id, appointment_id, patient_id, doctor_id, diagnosis, treatment, created_at)) => {
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| DatabaseError::InvalidEnum {
                    field: "created_at".into(),
                    value: e.to_string(),
                })?
                .with_timezone(&Utc);
            Ok(Some(MedicalRecord {
                id,
                appointment_id,
                patient_id,
                doctor_id,
                diagnosis,
                treatment,
                created_at,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn count_records_for_appointment(
    conn: &Connection,
    appointment_id: i64,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM medical_records WHERE appointment_id = ?1",
        params![appointment_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{insert_account, insert_appointment, insert_provider};

    fn seed_accepted(conn: &Connection) -> (i64, i64, i64) {
        let patient = insert_account(conn, "p1", "h", None, Role::Patient).unwrap();
        let doctor = insert_account(conn, "d1", "h", None, Role::Doctor).unwrap();
        insert_provider(
            conn,
            &Provider {
                id: doctor.id,
                name: "d1".into(),
                specialty: None,
            },
        )
        .unwrap();
        let ap = insert_appointment(conn, patient.id, doctor.id, "2025-01-01 10:00", None).unwrap();
        (ap.id, patient.id, doctor.id)
    }

    #[test]
    fn insert_and_find_record() {
        let conn = open_memory_database().unwrap();
        let (ap_id, patient_id, doctor_id) = seed_accepted(&conn);
        let now = Utc::now();
        let rec =
            insert_record(&conn, ap_id, patient_id, doctor_id, "flu", Some("rest"), now).unwrap();
        let fetched = find_record_for_appointment(&conn, ap_id).unwrap().unwrap();
        assert_eq!(fetched.id, rec.id);
        assert_eq!(fetched.diagnosis, "flu");
        assert_eq!(fetched.treatment.as_deref(), Some("rest"));
    }

    #[test]
    fn second_record_for_appointment_is_unique_violation() {
        let conn = open_memory_database().unwrap();
        let (ap_id, patient_id, doctor_id) = seed_accepted(&conn);
        let now = Utc::now();
        insert_record(&conn, ap_id, patient_id, doctor_id, "flu", None, now).unwrap();
        let err = insert_record(&conn, ap_id, patient_id, doctor_id, "cold", None, now).unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(count_records_for_appointment(&conn, ap_id).unwrap(), 1);
    }

    #[test]
    fn missing_record_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(find_record_for_appointment(&conn, 1).unwrap().is_none());
    }
}
