//! Event construction and in-process dispatch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::handlers::{
    CounterMode, EventHandler, HandlerError, VisitCounterHandler,
};
use crate::domain::entities::{RequestContext, User};
use crate::domain::event::{Event, EventUser};
use crate::domain::repositories::ShortLinkRepository;

/// What the emitter does when a handler returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop dispatching and return the error from [`EventEmitter::emit`].
    Propagate,
    /// Log the error at `warn` and go on with the next handler.
    Continue,
}

/// Error returned by [`EventEmitter::emit`].
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("event handler `{handler}` failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: HandlerError,
    },
}

struct RegisteredHandler {
    handler: Arc<dyn EventHandler>,
    on_error: OnError,
}

/// Builds events and hands them to registered handlers.
///
/// Two handler groups run for every event, each in registration order:
///
/// 1. External handlers, registered by whoever assembles the service.
///    Default policy [`OnError::Propagate`]: a failure aborts the emit call,
///    built-in handlers included.
/// 2. Built-in handlers. Always [`OnError::Continue`], so their failures
///    never reach the caller.
///
/// Handlers are awaited one at a time on the caller's task. Nothing is
/// queued or spawned.
pub struct EventEmitter {
    external: Vec<RegisteredHandler>,
    builtin: Vec<RegisteredHandler>,
}

impl EventEmitter {
    /// Creates an emitter with the given built-in handlers and no external
    /// handlers.
    pub fn new(builtin: Vec<Arc<dyn EventHandler>>) -> Self {
        Self {
            external: Vec::new(),
            builtin: builtin
                .into_iter()
                .map(|handler| RegisteredHandler {
                    handler,
                    on_error: OnError::Continue,
                })
                .collect(),
        }
    }

    /// Creates an emitter whose only built-in handler is the visit counter.
    pub fn with_default_handlers<R>(repository: Arc<R>, mode: CounterMode) -> Self
    where
        R: ShortLinkRepository + ?Sized + 'static,
    {
        Self::new(vec![Arc::new(VisitCounterHandler::new(repository, mode))])
    }

    /// Registers external handlers with [`OnError::Propagate`].
    pub fn with_external_handlers(
        mut self,
        handlers: impl IntoIterator<Item = Arc<dyn EventHandler>>,
    ) -> Self {
        for handler in handlers {
            self = self.with_external_handler(handler, OnError::Propagate);
        }
        self
    }

    /// Registers one external handler with an explicit error policy.
    pub fn with_external_handler(
        mut self,
        handler: Arc<dyn EventHandler>,
        on_error: OnError,
    ) -> Self {
        self.external.push(RegisteredHandler { handler, on_error });
        self
    }

    /// Number of external handlers.
    pub fn external_count(&self) -> usize {
        self.external.len()
    }

    /// Number of built-in handlers.
    pub fn builtin_count(&self) -> usize {
        self.builtin.len()
    }

    /// Builds an event and dispatches it to all handlers.
    ///
    /// `object_data` is modified in place: its `object` key is set to
    /// `object_type` before it is copied into the event.
    ///
    /// The actor is `user` if given, else `ctx.current_user`. When the actor
    /// has an email it is attached as `data.user`. `timestamp` defaults to
    /// now.
    ///
    /// Returns the dispatched event.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::Handler`] when an external handler registered
    /// with [`OnError::Propagate`] fails. Handlers after it, including all
    /// built-in handlers, are not called.
    #[allow(clippy::too_many_arguments)]
    pub async fn emit(
        &self,
        ctx: &RequestContext,
        org_id: &str,
        event_type: &str,
        object_type: &str,
        object_data: &mut Map<String, Value>,
        timestamp: Option<DateTime<Utc>>,
        user: Option<&User>,
    ) -> Result<Event, EmitError> {
        object_data.insert("object".to_string(), Value::String(object_type.to_string()));

        let event_user = user
            .or(ctx.current_user.as_ref())
            .and_then(|actor| actor.email.as_deref())
            .map(EventUser::new);

        let event = Event::new(
            org_id,
            event_type,
            object_data.clone(),
            event_user,
            timestamp.unwrap_or_else(Utc::now),
        );

        for registered in &self.external {
            dispatch(registered, &event).await?;
        }

        info!(
            count = self.builtin.len(),
            event_type, "Calling default event handlers"
        );
        for registered in &self.builtin {
            dispatch(registered, &event).await?;
        }

        Ok(event)
    }
}

async fn dispatch(registered: &RegisteredHandler, event: &Event) -> Result<(), EmitError> {
    let Err(e) = registered.handler.handle(event).await else {
        return Ok(());
    };

    match registered.on_error {
        OnError::Continue => {
            warn!(
                handler = registered.handler.name(),
                event_id = %event.id,
                event_type = %event.event_type,
                error = %e,
                "Event handler failed"
            );
            Ok(())
        }
        OnError::Propagate => Err(EmitError::Handler {
            handler: registered.handler.name().to_string(),
            source: e,
        }),
    }
}
