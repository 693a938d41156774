//! Read-only JSON API over a single spreadsheet workbook.
//!
//! [`services::excel::WorkbookStore`] owns all workbook access and caching;
//! the axum routes in [`routes`] only shape its results.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::excel::WorkbookStore;

// Application state
pub struct AppState {
    pub store: Arc<WorkbookStore>,
    pub default_limit: usize,
}

impl AppState {
    pub fn new(config: &config::Config) -> Self {
        Self {
            store: Arc::new(WorkbookStore::new(config.store.clone())),
            default_limit: config.default_limit,
        }
    }
}

/// Builds the full router; kept out of `main` so tests can drive it.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(routes::sheets::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
