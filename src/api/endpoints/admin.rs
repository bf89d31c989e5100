//! `GET /admin` — administrative console payload.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::{ApiError, ApiErrorKind};
use crate::api::types::ApiContext;
use crate::db::repository::{get_all_accounts, get_all_appointments, get_all_providers};
use crate::models::{Account, Appointment, Caller, Provider};

#[derive(Serialize)]
pub struct AdminConsoleResponse {
    pub accounts: Vec<Account>,
    pub providers: Vec<Provider>,
    pub appointments: Vec<Appointment>,
}

/// Full console payload: every account, provider, and appointment.
/// Admin role required; the session middleware has already
/// authenticated the caller.
pub async fn console(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<AdminConsoleResponse>, ApiError> {
    let Caller::Admin { .. } = caller else {
        return Err(ApiError::from(ApiErrorKind::Forbidden(
            "admin role required".into(),
        ))
        .at("/"));
    };
    let conn = ctx.conn()?;
    Ok(Json(AdminConsoleResponse {
        accounts: get_all_accounts(&conn)?,
        providers: get_all_providers(&conn)?,
        appointments: get_all_appointments(&conn)?,
    }))
}
