//! Products API - product catalog REST server

use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{self, MigratorTrait};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod app;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.postgres.redacted_url());
    let db = postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;

    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    info!(
        migrations = Migrator::migrations().len(),
        "Database schema is up to date"
    );

    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = app::build(&state)?;

    info!(
        "Starting Products API on port {} (products at /api{})",
        state.config.server.port, state.config.products_path
    );

    let db = state.db.clone();
    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing PostgreSQL connections");
        postgres::close(db).await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
