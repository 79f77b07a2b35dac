#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use link_events::application::handlers::{CounterMode, EventHandler, HandlerError};
use link_events::application::services::EventEmitter;
use link_events::domain::entities::{NewShortLink, ShortLink};
use link_events::domain::event::Event;
use link_events::domain::repositories::{ShortLinkRepository, StoreError};
use link_events::infrastructure::persistence::InMemoryShortLinkRepository;
use link_events::state::AppState;
use std::sync::{Arc, Mutex};

pub const TEST_ORG: &str = "org1";

pub fn new_link(shortpath: &str, destination_url: &str) -> NewShortLink {
    NewShortLink {
        namespace: "go".to_string(),
        shortpath: shortpath.to_string(),
        destination_url: destination_url.to_string(),
        owner: "alice@example.com".to_string(),
        unlisted: false,
    }
}

/// A link with a fixed id and visit count, for `InMemoryShortLinkRepository::put`.
pub fn link_with_visits(id: i64, shortpath: &str, visits_count: Option<i64>) -> ShortLink {
    let now = Utc::now();
    ShortLink {
        id,
        namespace: "go".to_string(),
        shortpath: shortpath.to_string(),
        destination_url: format!("https://example.com/{shortpath}"),
        owner: "alice@example.com".to_string(),
        unlisted: false,
        created: now,
        modified: now,
        visits_count,
        visits_count_last_updated: None,
    }
}

pub async fn create_test_link(
    repo: &InMemoryShortLinkRepository,
    shortpath: &str,
    url: &str,
) -> ShortLink {
    repo.insert(new_link(shortpath, url)).await
}

pub fn create_test_state(repo: Arc<InMemoryShortLinkRepository>) -> AppState {
    let emitter = EventEmitter::with_default_handlers(repo.clone(), CounterMode::ReadModifyWrite);
    AppState::new(repo, Arc::new(emitter), TEST_ORG.to_string())
}

/// Like [`create_test_state`], with `recorder` registered as an external handler.
pub fn create_recording_state(
    repo: Arc<InMemoryShortLinkRepository>,
    recorder: Arc<RecordingHandler>,
) -> AppState {
    let emitter = EventEmitter::with_default_handlers(repo.clone(), CounterMode::ReadModifyWrite)
        .with_external_handlers([recorder as Arc<dyn EventHandler>]);
    AppState::new(repo, Arc::new(emitter), TEST_ORG.to_string())
}

/// External handler that keeps every event it sees.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<Event>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

/// In-memory store whose reads or writes can be switched to fail.
pub struct FlakyRepository {
    pub inner: InMemoryShortLinkRepository,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FlakyRepository {
    pub fn failing_reads(inner: InMemoryShortLinkRepository) -> Self {
        Self {
            inner,
            fail_reads: true,
            fail_writes: false,
        }
    }

    pub fn failing_writes(inner: InMemoryShortLinkRepository) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: true,
        }
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("connection refused".to_string())
    }
}

#[async_trait]
impl ShortLinkRepository for FlakyRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        self.inner.get_by_id(id).await
    }

    async fn find_by_shortpath(
        &self,
        namespace: &str,
        shortpath: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        self.inner.find_by_shortpath(namespace, shortpath).await
    }

    async fn save(&self, link: &ShortLink) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        self.inner.save(link).await
    }

    async fn increment_visits(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<i64>, StoreError> {
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        self.inner.increment_visits(id, at).await
    }

    async fn health_check(&self) -> bool {
        !self.fail_reads
    }
}
