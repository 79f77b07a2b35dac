//! # Link Events
//!
//! Link follow events and visit counting for a go-links service, built with
//! Axum and PostgreSQL.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short links, events, and repository traits
//! - **Application Layer** ([`application`]) - Event emitter, handlers, link service
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and in-memory stores
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Events
//!
//! [`application::services::EventEmitter`] builds an event and runs every
//! registered handler in order on the calling task: external handlers first,
//! then built-in ones. The built-in
//! [`application::handlers::VisitCounterHandler`] bumps `visits_count` for
//! each `link_follow.created` event.
//!
//! ```rust,ignore
//! let repository = Arc::new(InMemoryShortLinkRepository::new());
//! let emitter = EventEmitter::with_default_handlers(repository, CounterMode::ReadModifyWrite);
//!
//! let mut data = serde_json::Map::new();
//! data.insert("link_id".into(), 42.into());
//! emitter
//!     .emit(&RequestContext::anonymous(), "org1", "link_follow.created", "link_follow", &mut data, None, None)
//!     .await?;
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::handlers::{
        CounterMode, EventHandler, HandlerError, VisitCounterHandler,
    };
    pub use crate::application::services::{EmitError, EventEmitter, LinkService, OnError};
    pub use crate::domain::entities::{NewShortLink, RequestContext, ShortLink, User};
    pub use crate::domain::event::{Event, LINK_FOLLOW_CREATED};
    pub use crate::domain::repositories::{ShortLinkRepository, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
