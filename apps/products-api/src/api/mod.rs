//! API routes module

pub mod health;
pub mod products;
pub mod samples;

use axum::Router;

use crate::state::AppState;

/// Create all routes served below `/api`
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new()
        .nest(&state.config.products_path, products::router(state))
        .merge(samples::router()?))
}
