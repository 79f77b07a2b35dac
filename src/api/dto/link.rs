//! DTOs for short link responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{ShortLink, User};
use crate::utils::last_visited::format_last_visited;

/// A short link as returned by `GET /api/links/{id}`.
///
/// `visits_count` is always present and reads 0 for links never counted.
/// `mine` is true when the requesting user owns the link; `can_edit` also
/// holds for admins.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub namespace: String,
    pub shortpath: String,
    pub destination_url: String,
    pub owner: String,
    pub mine: bool,
    pub can_edit: bool,
    pub unlisted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub visits_count: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits_count_last_updated: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<String>,
}

impl LinkResponse {
    /// Builds the response as seen by `viewer` at `now`.
    pub fn from_link(link: ShortLink, viewer: Option<&User>, now: DateTime<Utc>) -> Self {
        let mine = viewer
            .and_then(|u| u.email.as_deref())
            .is_some_and(|email| link.is_owned_by(email));
        let can_edit = mine || viewer.is_some_and(|u| u.admin);
        let last_visited = format_last_visited(link.visits_count_last_updated, now);

        Self {
            id: link.id,
            visits_count: link.visits(),
            namespace: link.namespace,
            shortpath: link.shortpath,
            destination_url: link.destination_url,
            owner: link.owner,
            mine,
            can_edit,
            unlisted: link.unlisted,
            created: link.created,
            modified: link.modified,
            visits_count_last_updated: link.visits_count_last_updated,
            last_visited,
        }
    }
}
