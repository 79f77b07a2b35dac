//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`event`] - Event record handed to event handlers
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Event dispatch lives in [`crate::application`].
//!
//! # Link Follow Flow
//!
//! 1. HTTP handler resolves `namespace/shortpath` to a [`entities::ShortLink`]
//! 2. A `link_follow.created` [`event::Event`] is emitted inline
//! 3. Each registered handler runs in turn; the visit counter bumps
//!    `visits_count` via [`repositories::ShortLinkRepository`]
//! 4. The client is redirected

pub mod entities;
pub mod event;
pub mod repositories;
