//! Optional handler writing every event to the log.

use async_trait::async_trait;
use tracing::debug;

use super::{EventHandler, HandlerError};
use crate::domain::event::Event;

/// Logs each event as JSON at `debug` level.
///
/// Registered as an external handler when `EVENT_LOG_ENABLED=true`.
#[derive(Debug, Default)]
pub struct EventLogHandler;

impl EventLogHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for EventLogHandler {
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let payload = serde_json::to_string(event).map_err(anyhow::Error::from)?;
        debug!(event_id = %event.id, event_type = %event.event_type, %payload, "Event emitted");
        Ok(())
    }

    fn name(&self) -> &str {
        "event_log"
    }
}
