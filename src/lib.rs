pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod lifecycle;
pub mod models;
pub mod seed;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the app default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
