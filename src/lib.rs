pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::db::Store;
use crate::services::presentation::DisplayLocale;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: config::AppConfig,
    pub locale: DisplayLocale,
}

impl AppState {
    pub fn new(store: Store, config: config::AppConfig) -> Self {
        let locale = DisplayLocale::from_offset_minutes(config.display_utc_offset_minutes);
        Self {
            store: Arc::new(store),
            config,
            locale,
        }
    }
}

/// Build the API router without transport layers (CORS, tracing).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::page))
        .route("/dashboard/state", get(routes::dashboard::view_state));

    Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .nest("/api/v1", api_routes)
        .with_state(state)
}
