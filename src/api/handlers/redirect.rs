//! Handler for following a go link.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects `namespace/shortpath` to its destination and counts the visit.
///
/// # Endpoint
///
/// `GET /{namespace}/{shortpath}`
///
/// # Request Flow
///
/// 1. Resolve the link by namespace and shortpath
/// 2. Emit `link_follow.created`; handlers run before the response is sent
/// 3. Return 307 Temporary Redirect
///
/// Handler failures never fail the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the shortpath doesn't exist.
pub async fn redirect_handler(
    Path((namespace, shortpath)): Path<(String, String)>,
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = current_user.into_context();

    let link = state
        .link_service
        .follow_link(&ctx, &namespace, &shortpath)
        .await?;

    debug!(link_id = link.id, destination = %link.destination_url, "Following link");

    Ok(Redirect::temporary(&link.destination_url))
}
