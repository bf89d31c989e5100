use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinical outcome of a completed appointment. At most one per
/// appointment; immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub diagnosis: String,
    pub treatment: Option<String>,
    pub created_at: DateTime<Utc>,
}
