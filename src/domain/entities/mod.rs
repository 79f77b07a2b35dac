//! Core domain entities.
//!
//! - [`ShortLink`] - A go link and its visit statistics
//! - [`User`] - The acting identity resolved by upstream authentication
//! - [`RequestContext`] - Explicit carrier of the current user

pub mod short_link;
pub mod user;

pub use short_link::{NewShortLink, ShortLink};
pub use user::{RequestContext, User};
