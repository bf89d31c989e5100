use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// A booking request linking a patient to a provider at a requested
/// time. `time` is free text, as entered on the booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub time: String,
    pub note: Option<String>,
    pub status: AppointmentStatus,
}

/// An appointment joined with the names the role-dependent list views
/// need: a patient sees the provider, a doctor sees the patient.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient_name: Option<String>,
    pub provider_name: Option<String>,
    pub provider_specialty: Option<String>,
    pub has_record: bool,
}
