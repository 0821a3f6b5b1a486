//! HTTP layer
//!
//! Routes requests onto the category store.

pub mod handlers;
pub mod responses;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::middleware::log_request;

pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/{category}",
            get(handlers::list_files).post(handlers::upload_file),
        )
        .route("/api/{category}/{name}", delete(handlers::delete_file))
        .route("/data-api/{category}/{name}", get(handlers::serve_file))
        .route("/markers/all", get(handlers::list_markers))
        .route("/configs", post(handlers::save_config))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
