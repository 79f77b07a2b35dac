//! HTTP middleware and extractors.
//!
//! Provides request tracing and current-user extraction.

pub mod current_user;
pub mod tracing;

pub use current_user::CurrentUser;
