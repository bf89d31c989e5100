//! `GET /doctors` — provider directory.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::get_all_providers;
use crate::models::Provider;

#[derive(Serialize)]
pub struct DirectoryResponse {
    pub providers: Vec<Provider>,
}

/// List all providers. No filtering or pagination.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DirectoryResponse>, ApiError> {
    let conn = ctx.conn()?;
    let providers = get_all_providers(&conn)?;
    Ok(Json(DirectoryResponse { providers }))
}
