//! Medical record creation: `GET,POST /create_record/:appointment_id`.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{see_other, ApiContext};
use crate::lifecycle::{self, LifecycleError};
use crate::models::{Appointment, Caller};

#[derive(Serialize)]
pub struct RecordFormResponse {
    pub form: &'static str,
    pub appointment: Appointment,
    pub patient_name: Option<String>,
    pub fields: &'static [&'static str],
}

#[derive(Deserialize)]
pub struct RecordRequest {
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: Option<String>,
}

/// `GET /create_record/:appointment_id` — record form metadata.
///
/// Runs the same precondition checks as creation, so an unauthorized
/// or out-of-state request fails here instead of at submit time.
pub async fn form(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<RecordFormResponse>, ApiError> {
    let conn = ctx.conn()?;
    let (appointment, patient) = lifecycle::record_context(&conn, &caller, appointment_id)?;
    Ok(Json(RecordFormResponse {
        form: "create_record",
        appointment,
        patient_name: patient.display_name.or(Some(patient.handle)),
        fields: &["diagnosis", "treatment"],
    }))
}

/// `POST /create_record/:appointment_id` — create the record and
/// complete the appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<RecordRequest>,
) -> Result<Response, ApiError> {
    let conn = ctx.conn()?;
    lifecycle::create_record(
        &conn,
        &caller,
        appointment_id,
        &req.diagnosis,
        req.treatment.as_deref(),
    )
    .map_err(|e| match e {
        e @ LifecycleError::Validation(_) => {
            ApiError::from(e).at(format!("/create_record/{appointment_id}"))
        }
        e => ApiError::from(e),
    })?;
    Ok(see_other("Medical record created", "/my_appointments"))
}
