//! Extractor for the signed-in user.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::domain::entities::{RequestContext, User};

/// The user installed as a request extension by upstream authentication,
/// if any.
///
/// Never rejects: anonymous requests yield `CurrentUser(None)`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) {
///     let ctx = RequestContext { current_user: user };
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    /// Converts into the context passed to services.
    pub fn into_context(self) -> RequestContext {
        RequestContext {
            current_user: self.0,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<User>().cloned()))
    }
}
