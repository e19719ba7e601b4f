//! Full HTTP application: API, documentation, health and readiness

use axum::Router;
use axum_helpers::{cors_layer_from_origins, create_router, health_router};

use crate::{api, openapi, state::AppState};

/// Compose every route the server answers
pub fn build(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state)?;
    let cors = cors_layer_from_origins(state.config.cors_allowed_origin.as_deref())?;

    Ok(create_router(api_routes, openapi::api_doc(&state.config), cors)
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.db.clone())))
}
