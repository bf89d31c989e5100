//! Shared types for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rusqlite::Connection;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::db::{open_memory_database, DatabaseError};
use crate::session::SessionStore;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Shared context for all routes and middleware: the database
/// connection and the session store. One connection guarded by a
/// mutex — each operation holds it for its full duration.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }

    /// Fresh context over an in-memory database (for tests).
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(open_memory_database()?))
    }

    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::internal("database lock poisoned"))
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::internal("session lock poisoned"))
    }
}

/// Body carried by successful mutations alongside the redirect.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub notice: String,
    pub redirect_to: String,
}

/// `303 See Other` to the given view, with the notice in the body.
/// A thin front end shows the notice and follows the redirect.
pub fn see_other(notice: impl Into<String>, to: &str) -> Response {
    let body = Notice {
        notice: notice.into(),
        redirect_to: to.to_string(),
    };
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, to.to_string())],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn see_other_sets_location_and_body() {
        let response = see_other("Booking placed", "/");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["notice"], "Booking placed");
        assert_eq!(json["redirect_to"], "/");
    }

    #[test]
    fn context_hands_out_connection() {
        let ctx = ApiContext::in_memory().unwrap();
        let conn = ctx.conn().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |r| r.get(0)).unwrap();
        assert_eq!(one, 1);
    }
}
