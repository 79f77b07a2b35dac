//! Repository trait for short link data access.

use crate::domain::entities::ShortLink;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by a short link store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("visit count of link {0} is at its maximum")]
    CounterOverflow(i64),
}

/// Repository interface for short links.
///
/// Only the narrow surface needed for following links and counting visits.
/// Link creation and editing belong to the link management service.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortLinkRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn get_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link by namespace and shortpath, e.g. `go` + `wiki`.
    ///
    /// Shortpaths are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn find_by_shortpath(
        &self,
        namespace: &str,
        shortpath: &str,
    ) -> Result<Option<ShortLink>, StoreError>;

    /// Writes back a previously loaded link.
    ///
    /// This is a plain overwrite with no version check: two callers that
    /// loaded the same link race, and the last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    async fn save(&self, link: &ShortLink) -> Result<(), StoreError>;

    /// Increments `visits_count` (unset counts as zero) and sets
    /// `visits_count_last_updated` in a single store operation.
    ///
    /// Returns the new count, or `None` if no link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the update fails.
    async fn increment_visits(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<i64>, StoreError>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
