//! Link lookup and follow service.

use std::sync::Arc;

use crate::application::services::event_service::EventEmitter;
use crate::domain::entities::{RequestContext, ShortLink};
use crate::domain::event::LINK_FOLLOW_CREATED;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use serde_json::{Map, json};
use tracing::error;

/// Service resolving short links and recording follows.
pub struct LinkService<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    emitter: Arc<EventEmitter>,
    organization: String,
}

impl<R: ShortLinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service emitting events for `organization`.
    pub fn new(repository: Arc<R>, emitter: Arc<EventEmitter>, organization: String) -> Self {
        Self {
            repository,
            emitter,
            organization,
        }
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link(&self, id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Resolves `namespace/shortpath` and emits `link_follow.created` for it.
    ///
    /// Event dispatch never fails the follow: an [`crate::application::services::EmitError`]
    /// is logged and the link is still returned. The returned link reflects
    /// the store before the visit was counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shortpath is unknown.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn follow_link(
        &self,
        ctx: &RequestContext,
        namespace: &str,
        shortpath: &str,
    ) -> Result<ShortLink, AppError> {
        let link = self
            .repository
            .find_by_shortpath(namespace, shortpath)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found",
                    json!({ "namespace": namespace, "shortpath": shortpath }),
                )
            })?;

        let mut object_data = Map::new();
        object_data.insert("link_id".to_string(), json!(link.id));

        if let Err(e) = self
            .emitter
            .emit(
                ctx,
                &self.organization,
                LINK_FOLLOW_CREATED,
                "link_follow",
                &mut object_data,
                None,
                None,
            )
            .await
        {
            error!(link_id = link.id, error = %e, "Failed to emit link follow event");
        }

        Ok(link)
    }
}
