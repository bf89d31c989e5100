//! CliniCare server binary.
//!
//! Opens (and migrates) the database, seeds the admin account and the
//! doctor roster on first run, then serves the HTTP API until Ctrl-C.

use cliniccare::api::{start_server, ApiContext};
use cliniccare::db::sqlite::open_database;
use cliniccare::seed::ensure_seed_data;
use cliniccare::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_database(&db_path)?;

    let created = ensure_seed_data(&conn)?;
    if created > 0 {
        tracing::info!(created, "seeded initial accounts");
    }

    let ctx = ApiContext::new(conn);
    let mut server = start_server(ctx, config::bind_addr()).await?;
    tracing::info!(addr = %server.addr, "CliniCare listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    server.shutdown();

    Ok(())
}
