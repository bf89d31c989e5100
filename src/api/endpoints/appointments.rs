//! Appointment list and lifecycle transition endpoints.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{see_other, ApiContext};
use crate::db::repository::{list_appointments_for_patient, list_appointments_for_provider};
use crate::lifecycle::{self, LifecycleAction, PostTransitionView};
use crate::models::{AppointmentView, Caller, Role};

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub role: Role,
    pub appointments: Vec<AppointmentView>,
}

/// `GET /my_appointments` — the caller's appointments.
///
/// Doctors see their incoming bookings with patient names; patients
/// (and admins acting as bookers) see their own bookings with provider
/// profiles.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = ctx.conn()?;
    let appointments = match caller {
        Caller::Doctor { provider_id, .. } => list_appointments_for_provider(&conn, provider_id)?,
        _ => list_appointments_for_patient(&conn, caller.account_id())?,
    };
    Ok(Json(AppointmentsResponse {
        role: caller.role(),
        appointments,
    }))
}

/// `GET /appointment/:id/action/:action` — accept or reject.
pub async fn action(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path((appointment_id, action)): Path<(i64, String)>,
) -> Result<Response, ApiError> {
    let action = LifecycleAction::from_str(&action)?;
    let conn = ctx.conn()?;
    let (_, view) = lifecycle::transition_appointment(&conn, &caller, appointment_id, action)?;
    let (notice, to) = match (action, view) {
        (LifecycleAction::Accept, PostTransitionView::DoctorAppointments) => {
            ("Appointment accepted", "/my_appointments")
        }
        (LifecycleAction::Reject, PostTransitionView::DoctorAppointments) => {
            ("Appointment rejected", "/my_appointments")
        }
        (LifecycleAction::Accept, PostTransitionView::AdminConsole) => {
            ("Appointment accepted", "/admin")
        }
        (LifecycleAction::Reject, PostTransitionView::AdminConsole) => {
            ("Appointment rejected", "/admin")
        }
    };
    Ok(see_other(notice, to))
}
