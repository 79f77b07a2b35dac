//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`                   - Store health check
//! - `GET /api/links/{id}`           - Link details with visit statistics
//! - `GET /{namespace}/{shortpath}`  - Follow a go link (counts the visit)
//!
//! Requests are traced and trailing slashes trimmed.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .route("/{namespace}/{shortpath}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
