//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Two route groups: public (landing, register, login,
//! directory, booking) and session-protected (appointment views,
//! lifecycle actions, record creation, admin console).
//!
//! Handlers use `State<ApiContext>`; the session middleware reads the
//! same context from an `Extension` layer (outermost) and injects the
//! resolved `Caller` for protected handlers.

use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the application router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn app_router(ctx: ApiContext) -> Router {
    let public = Router::new()
        .route("/", get(endpoints::home::landing))
        .route(
            "/register",
            get(endpoints::auth::register_form).post(endpoints::auth::register),
        )
        .route(
            "/login",
            get(endpoints::auth::login_form).post(endpoints::auth::login),
        )
        .route("/logout", get(endpoints::auth::logout))
        .route("/doctors", get(endpoints::directory::list))
        .route(
            "/booking/:provider_id",
            get(endpoints::booking::form).post(endpoints::booking::create),
        )
        .with_state(ctx.clone());

    // Protected routes — session middleware injects the Caller.
    // Extension must be outermost so the middleware can extract ApiContext.
    let protected = Router::new()
        .route("/my_appointments", get(endpoints::appointments::list))
        .route("/admin", get(endpoints::admin::console))
        .route(
            "/appointment/:id/action/:action",
            get(endpoints::appointments::action),
        )
        .route(
            "/create_record/:appointment_id",
            get(endpoints::records::form).post(endpoints::records::create),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(
            middleware::session::require_session,
        ))
        .layer(axum::Extension(ctx));

    public.merge(protected)
}
