//! HTTP API layer.
//!
//! Exposes the booking lifecycle over HTTP for browser clients.
//! Responses are JSON; navigation flows answer `303 See Other` with a
//! `Location` header plus a notice body, and errors carry a
//! `redirect_to` hint so a thin front end can route the user back.
//!
//! The router is composable — `app_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::{ApiError, ApiErrorKind};
pub use router::app_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
