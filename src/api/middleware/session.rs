//! Session cookie middleware.
//!
//! Resolves the `session` cookie to a `Caller` and injects it into
//! request extensions for downstream handlers. The account is
//! re-fetched from the database on every request — the session holds
//! only the identifier.

use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::{ApiError, ApiErrorKind};
use crate::api::types::{ApiContext, SESSION_COOKIE};
use crate::db::repository::get_account;
use crate::models::Caller;

/// Pull the session token out of the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')
            .map(|v| v.to_string())
    })
}

/// Resolve the caller for an optional session — used by routes that
/// serve both anonymous and signed-in callers.
pub fn resolve_caller(ctx: &ApiContext, headers: &HeaderMap) -> Result<Option<Caller>, ApiError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    let Some(account_id) = ctx.sessions()?.resolve(&token) else {
        return Ok(None);
    };
    let conn = ctx.conn()?;
    let Some(account) = get_account(&conn, account_id)? else {
        return Ok(None);
    };
    Ok(Some(Caller::from_account(&account)))
}

/// Require a valid session.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer). On success injects `Caller`; role and ownership
/// checks stay in the lifecycle controller.
pub async fn require_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_session_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or_else(|| ApiError::internal("missing API context"))?;

    let caller = resolve_caller(&ctx, req.headers())?
        .ok_or(ApiError::from(ApiErrorKind::NotAuthenticated))?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
