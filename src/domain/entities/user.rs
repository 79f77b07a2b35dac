//! Acting identity and the request context it travels in.

/// A signed-in user as seen by this service.
///
/// Authentication happens upstream; this is only the identity it resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub email: Option<String>,
    pub admin: bool,
}

impl User {
    /// Creates a non-admin user with the given email.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            admin: false,
        }
    }
}

/// Per-request context passed explicitly to code that needs the current user.
///
/// `current_user` is `None` for anonymous requests and background work.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub current_user: Option<User>,
}

impl RequestContext {
    /// Context with no signed-in user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a signed-in user.
    pub fn for_user(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }
}
