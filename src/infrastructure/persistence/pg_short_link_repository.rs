//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{ShortLinkRepository, StoreError};

/// PostgreSQL repository for short links.
///
/// Uses bound parameters for every query.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ShortLinkRow {
    id: i64,
    namespace: String,
    shortpath: String,
    destination_url: String,
    owner: String,
    unlisted: bool,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    visits_count: Option<i64>,
    visits_count_last_updated: Option<DateTime<Utc>>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        ShortLink {
            id: r.id,
            namespace: r.namespace,
            shortpath: r.shortpath,
            destination_url: r.destination_url,
            owner: r.owner,
            unlisted: r.unlisted,
            created: r.created,
            modified: r.modified,
            visits_count: r.visits_count,
            visits_count_last_updated: r.visits_count_last_updated,
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, namespace, shortpath, destination_url, owner, unlisted,
           created, modified, visits_count, visits_count_last_updated
    FROM short_links
"#;

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_shortpath(
        &self,
        namespace: &str,
        shortpath: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "{SELECT_COLUMNS} WHERE namespace = $1 AND LOWER(shortpath) = LOWER($2)"
        ))
        .bind(namespace)
        .bind(shortpath)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn save(&self, link: &ShortLink) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE short_links
            SET namespace = $2,
                shortpath = $3,
                destination_url = $4,
                owner = $5,
                unlisted = $6,
                modified = $7,
                visits_count = $8,
                visits_count_last_updated = $9
            WHERE id = $1
            "#,
        )
        .bind(link.id)
        .bind(&link.namespace)
        .bind(&link.shortpath)
        .bind(&link.destination_url)
        .bind(&link.owner)
        .bind(link.unlisted)
        .bind(link.modified)
        .bind(link.visits_count)
        .bind(link.visits_count_last_updated)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn increment_visits(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<i64>, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE short_links
            SET visits_count = COALESCE(visits_count, 0) + 1,
                visits_count_last_updated = $2
            WHERE id = $1
            RETURNING visits_count
            "#,
        )
        .bind(id)
        .bind(at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
