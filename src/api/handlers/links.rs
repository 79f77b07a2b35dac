//! Handler for short link details.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::link::LinkResponse;
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link with its visit statistics.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Response
///
/// ```json
/// {
///   "id": 42,
///   "namespace": "go",
///   "shortpath": "wiki",
///   "destination_url": "https://wiki.example.com",
///   "owner": "alice@example.com",
///   "mine": false,
///   "can_edit": false,
///   "unlisted": false,
///   "created": "2025-01-01T12:00:00Z",
///   "modified": "2025-01-01T12:00:00Z",
///   "visits_count": 6,
///   "visits_count_last_updated": "2025-01-02T08:30:00Z",
///   "last_visited": "3 hours ago"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if `id` is not positive
/// - 404 Not Found if no link has this id
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<LinkResponse>, AppError> {
    if id <= 0 {
        return Err(AppError::bad_request(
            "Link id must be positive",
            json!({ "id": id }),
        ));
    }

    let link = state.link_service.get_link(id).await?;
    Ok(Json(LinkResponse::from_link(link, user.as_ref(), Utc::now())))
}
