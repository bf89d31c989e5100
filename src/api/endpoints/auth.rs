//! Registration, login, and logout.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::middleware::session::session_token;
use crate::api::types::{see_other, ApiContext, Notice, SESSION_COOKIE};
use crate::lifecycle;

#[derive(Serialize)]
pub struct FormResponse {
    pub form: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

/// `GET /register` — form metadata.
pub async fn register_form() -> Json<FormResponse> {
    Json(FormResponse {
        form: "register",
        fields: &["handle", "password", "display_name"],
    })
}

/// `POST /register` — create a patient account.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let conn = ctx.conn()?;
    lifecycle::register(&conn, &req.handle, &req.password, req.display_name.as_deref())
        .map_err(|e| ApiError::from(e).at("/register"))?;
    Ok(see_other("Registration successful. Please log in.", "/login"))
}

/// `GET /login` — form metadata.
pub async fn login_form() -> Json<FormResponse> {
    Json(FormResponse {
        form: "login",
        fields: &["handle", "password"],
    })
}

/// `POST /login` — authenticate and establish a session.
///
/// On success the session token travels back as an HttpOnly cookie;
/// the server keeps only its hash.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let account = {
        let conn = ctx.conn()?;
        lifecycle::authenticate(&conn, &req.handle, &req.password)?
    };
    let token = ctx.sessions()?.issue(account.id);

    let body = Notice {
        notice: "Signed in".into(),
        redirect_to: "/".into(),
    };
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    let response = (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, cookie),
        ],
        Json(body),
    );
    Ok(response.into_response())
}

/// `GET /logout` — revoke the session and clear the cookie.
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(token) = session_token(&headers) {
        ctx.sessions()?.revoke(&token);
    }
    let body = Notice {
        notice: "Signed out".into(),
        redirect_to: "/".into(),
    };
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    let response = (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, cookie),
        ],
        Json(body),
    );
    Ok(response.into_response())
}
