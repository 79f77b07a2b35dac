//! Event handlers invoked by [`crate::application::services::EventEmitter`].
//!
//! - [`VisitCounterHandler`] - Built-in; counts link follows
//! - [`EventLogHandler`] - Optional; logs every event as JSON

pub mod event_log;
pub mod visit_counter;

pub use event_log::EventLogHandler;
pub use visit_counter::{CounterMode, VisitCounterHandler};

use crate::domain::event::Event;
use crate::domain::repositories::StoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by an event handler.
///
/// What happens next is decided by the emitter's per-handler
/// [`crate::application::services::OnError`] policy, not by the handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to update visit count for link {link_id}: {source}")]
    Store {
        link_id: i64,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Something that reacts to an [`Event`].
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one event. Handlers see every event and ignore the types they
    /// don't care about.
    async fn handle(&self, event: &Event) -> Result<(), HandlerError>;

    /// Name used in logs and in [`crate::application::services::EmitError`].
    fn name(&self) -> &str;
}
