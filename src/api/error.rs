//! API error type with structured JSON responses.
//!
//! Domain errors are caught at the operation boundary and converted to
//! a user-facing notice plus a pointer back to a sensible prior view
//! (`redirect_to`). Only unexpected storage errors surface as 500s,
//! with details logged and hidden from the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::lifecycle::LifecycleError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level error: a domain error kind plus the prior view to send
/// the caller back to. The view has a per-kind default; endpoints with
/// a more specific prior view override it with [`ApiError::at`].
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    redirect_to: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error("Authentication required")]
    NotAuthenticated,
    #[error("Invalid handle or password")]
    AuthenticationFailed,
    #[error("Not permitted: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Handle already taken")]
    DuplicateHandle,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("A record already exists for this appointment")]
    AlreadyExists,
    #[error("Unrecognized action: {0}")]
    InvalidAction(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiErrorKind::Internal(detail.into()).into()
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiErrorKind::NotFound(detail.into()).into()
    }

    /// Override the prior view the client is pointed back to.
    pub fn at(mut self, view: impl Into<String>) -> Self {
        self.redirect_to = Some(view.into());
        self
    }

    fn default_view(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::NotAuthenticated | ApiErrorKind::AuthenticationFailed => "/login",
            ApiErrorKind::DuplicateHandle => "/register",
            ApiErrorKind::Forbidden(_)
            | ApiErrorKind::InvalidState(_)
            | ApiErrorKind::AlreadyExists
            | ApiErrorKind::InvalidAction(_) => "/my_appointments",
            ApiErrorKind::NotFound(_) | ApiErrorKind::Validation(_) | ApiErrorKind::Internal(_) => {
                "/"
            }
        }
    }
}

impl From<ApiErrorKind> for ApiError {
    fn from(kind: ApiErrorKind) -> Self {
        Self {
            kind,
            redirect_to: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.kind {
            ApiErrorKind::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                "NOT_AUTHENTICATED",
                self.kind.to_string(),
            ),
            ApiErrorKind::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                self.kind.to_string(),
            ),
            ApiErrorKind::Forbidden(_) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", self.kind.to_string())
            }
            ApiErrorKind::NotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.kind.to_string())
            }
            ApiErrorKind::DuplicateHandle => (
                StatusCode::CONFLICT,
                "DUPLICATE_HANDLE",
                self.kind.to_string(),
            ),
            ApiErrorKind::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION",
                self.kind.to_string(),
            ),
            ApiErrorKind::InvalidState(_) => {
                (StatusCode::CONFLICT, "INVALID_STATE", self.kind.to_string())
            }
            ApiErrorKind::AlreadyExists => (
                StatusCode::CONFLICT,
                "ALREADY_EXISTS",
                self.kind.to_string(),
            ),
            ApiErrorKind::InvalidAction(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_ACTION",
                self.kind.to_string(),
            ),
            ApiErrorKind::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let default_view = self.default_view().to_string();
        let redirect_to = self.redirect_to.unwrap_or(default_view);
        let body = ErrorBody {
            error: ErrorDetail { code, message },
            redirect_to,
        };
        (status, Json(body)).into_response()
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        let kind = match err {
            LifecycleError::NotAuthenticated => ApiErrorKind::NotAuthenticated,
            LifecycleError::AuthenticationFailed => ApiErrorKind::AuthenticationFailed,
            LifecycleError::AuthorizationDenied(detail) => ApiErrorKind::Forbidden(detail),
            LifecycleError::NotFound(detail) => ApiErrorKind::NotFound(detail),
            LifecycleError::DuplicateHandle => ApiErrorKind::DuplicateHandle,
            LifecycleError::Validation(detail) => ApiErrorKind::Validation(detail),
            LifecycleError::InvalidState(detail) => ApiErrorKind::InvalidState(detail),
            LifecycleError::AlreadyExists => ApiErrorKind::AlreadyExists,
            LifecycleError::InvalidAction(tag) => ApiErrorKind::InvalidAction(tag),
            LifecycleError::Database(e) => ApiErrorKind::Internal(e.to_string()),
        };
        kind.into()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiErrorKind::Internal(err.to_string()).into()
    }
}
