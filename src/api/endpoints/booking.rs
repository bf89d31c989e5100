//! Booking: `GET,POST /booking/:provider_id`.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::middleware::session::resolve_caller;
use crate::api::types::{see_other, ApiContext};
use crate::db::repository::get_provider;
use crate::lifecycle;
use crate::models::Provider;

#[derive(Serialize)]
pub struct BookingFormResponse {
    pub form: &'static str,
    pub provider: Provider,
    pub fields: &'static [&'static str],
}

#[derive(Deserialize)]
pub struct BookingRequest {
    pub time: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// `GET /booking/:provider_id` — booking form metadata for a provider.
pub async fn form(
    State(ctx): State<ApiContext>,
    Path(provider_id): Path<i64>,
) -> Result<Json<BookingFormResponse>, ApiError> {
    let conn = ctx.conn()?;
    let provider = get_provider(&conn, provider_id)?
        .ok_or_else(|| ApiError::not_found(format!("provider {provider_id}")))?;
    Ok(Json(BookingFormResponse {
        form: "booking",
        provider,
        fields: &["time", "note"],
    }))
}

/// `POST /booking/:provider_id` — create a pending appointment.
///
/// The route is public (the form is browsable anonymously) so the
/// caller is resolved here rather than by the session middleware;
/// booking without a session is `NotAuthenticated`.
pub async fn create(
    State(ctx): State<ApiContext>,
    Path(provider_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<BookingRequest>,
) -> Result<Response, ApiError> {
    let caller = resolve_caller(&ctx, &headers)?;
    let conn = ctx.conn()?;
    lifecycle::book_appointment(
        &conn,
        caller.as_ref(),
        provider_id,
        &req.time,
        req.note.as_deref(),
    )
    .map_err(|e| match e {
        e @ lifecycle::LifecycleError::Validation(_) => {
            ApiError::from(e).at(format!("/booking/{provider_id}"))
        }
        e => ApiError::from(e),
    })?;
    Ok(see_other("Booking placed", "/"))
}
