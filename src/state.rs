//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{EventEmitter, LinkService};
use crate::domain::repositories::ShortLinkRepository;

/// Application state shared across all request handlers.
///
/// Cloned per request; all fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn ShortLinkRepository>>,
    pub repository: Arc<dyn ShortLinkRepository>,
}

impl AppState {
    /// Wires the link service over `repository` and `emitter`.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        emitter: Arc<EventEmitter>,
        organization: String,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repository.clone(),
            emitter,
            organization,
        ));

        Self {
            link_service,
            repository,
        }
    }
}
