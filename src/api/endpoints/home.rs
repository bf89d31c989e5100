//! `GET /` — landing payload.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::middleware::session::resolve_caller;
use crate::api::types::ApiContext;
use crate::config;
use crate::db::repository::get_account;
use crate::models::Role;

#[derive(Serialize)]
pub struct LandingResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub caller: Option<CallerInfo>,
}

#[derive(Serialize)]
pub struct CallerInfo {
    pub handle: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Landing page: service identity plus the signed-in caller, if any.
pub async fn landing(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<Json<LandingResponse>, ApiError> {
    let caller = resolve_caller(&ctx, &headers)?;
    let caller = match caller {
        Some(caller) => {
            let conn = ctx.conn()?;
            get_account(&conn, caller.account_id())?.map(|account| CallerInfo {
                handle: account.handle,
                display_name: account.display_name,
                role: account.role,
            })
        }
        None => None,
    };
    Ok(Json(LandingResponse {
        service: config::APP_NAME,
        version: config::APP_VERSION,
        caller,
    }))
}
