//! In-process short link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};

/// A short link store backed by a `HashMap`.
///
/// Used by integration tests and by callers that embed the event emitter
/// without a database. Nothing is persisted across restarts.
#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    links: RwLock<HashMap<i64, ShortLink>>,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory short link store");
        Self::default()
    }

    /// Adds a link and returns it with its assigned id.
    pub async fn insert(&self, new_link: NewShortLink) -> ShortLink {
        let mut links = self.links.write().await;
        let id = links.keys().max().copied().unwrap_or(0) + 1;
        let now = Utc::now();

        let link = ShortLink {
            id,
            namespace: new_link.namespace,
            shortpath: new_link.shortpath,
            destination_url: new_link.destination_url,
            owner: new_link.owner,
            unlisted: new_link.unlisted,
            created: now,
            modified: now,
            visits_count: None,
            visits_count_last_updated: None,
        };
        links.insert(id, link.clone());
        link
    }

    /// Replaces or adds a link under its own id.
    pub async fn put(&self, link: ShortLink) {
        self.links.write().await.insert(link.id, link);
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.links.read().await.get(&id).cloned())
    }

    async fn find_by_shortpath(
        &self,
        namespace: &str,
        shortpath: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .find(|l| l.namespace == namespace && l.shortpath.eq_ignore_ascii_case(shortpath))
            .cloned())
    }

    async fn save(&self, link: &ShortLink) -> Result<(), StoreError> {
        let mut links = self.links.write().await;
        match links.get_mut(&link.id) {
            Some(stored) => {
                *stored = link.clone();
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!(
                "link {} does not exist",
                link.id
            ))),
        }
    }

    async fn increment_visits(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<i64>, StoreError> {
        let mut links = self.links.write().await;
        let Some(link) = links.get_mut(&id) else {
            return Ok(None);
        };
        link.record_visit(at).ok_or(StoreError::CounterOverflow(id))?;
        Ok(Some(link.visits()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(shortpath: &str) -> NewShortLink {
        NewShortLink {
            namespace: "go".to_string(),
            shortpath: shortpath.to_string(),
            destination_url: format!("https://example.com/{shortpath}"),
            owner: "alice@example.com".to_string(),
            unlisted: false,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryShortLinkRepository::new();

        let a = repo.insert(new_link("a")).await;
        let b = repo.insert(new_link("b")).await;

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.len().await, 2);
        assert!(a.visits_count.is_none());
    }

    #[tokio::test]
    async fn test_find_by_shortpath_ignores_case() {
        let repo = InMemoryShortLinkRepository::new();
        repo.insert(new_link("Wiki")).await;

        let found = repo.find_by_shortpath("go", "wiki").await.unwrap();
        assert!(found.is_some());

        let other_namespace = repo.find_by_shortpath("to", "wiki").await.unwrap();
        assert!(other_namespace.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repo = InMemoryShortLinkRepository::new();
        let mut link = repo.insert(new_link("wiki")).await;

        link.record_visit(Utc::now());
        repo.save(&link).await.unwrap();

        let stored = repo.get_by_id(link.id).await.unwrap().unwrap();
        assert_eq!(stored.visits_count, Some(1));
    }

    #[tokio::test]
    async fn test_save_unknown_link_fails() {
        let repo = InMemoryShortLinkRepository::new();
        let mut link = repo.insert(new_link("wiki")).await;
        link.id = 99;

        assert!(repo.save(&link).await.is_err());
    }

    #[tokio::test]
    async fn test_increment_visits() {
        let repo = InMemoryShortLinkRepository::new();
        let link = repo.insert(new_link("wiki")).await;

        assert_eq!(repo.increment_visits(link.id, Utc::now()).await.unwrap(), Some(1));
        assert_eq!(repo.increment_visits(link.id, Utc::now()).await.unwrap(), Some(2));
        assert_eq!(repo.increment_visits(999, Utc::now()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_increment_visits_at_max_fails() {
        let repo = InMemoryShortLinkRepository::new();
        let mut link = repo.insert(new_link("wiki")).await;
        link.visits_count = Some(i64::MAX);
        repo.put(link.clone()).await;

        let result = repo.increment_visits(link.id, Utc::now()).await;

        assert!(matches!(result, Err(StoreError::CounterOverflow(id)) if id == link.id));
        let stored = repo.get_by_id(link.id).await.unwrap().unwrap();
        assert_eq!(stored.visits_count, Some(i64::MAX));
    }
}
