//! API route configuration.

use crate::api::handlers::get_link_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /links/{id}` - Link details with visit statistics
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/links/{id}", get(get_link_handler))
}
