//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports whether the short link store is reachable.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: store reachable
/// - **503 Service Unavailable**: store unreachable
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": { "reachable": true, "message": "Store reachable" }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = state.repository.health_check().await;
    let status = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(HealthResponse::from_store_check(reachable)))
}
