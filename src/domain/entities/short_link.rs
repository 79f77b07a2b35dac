//! Short link entity with visit statistics.

use chrono::{DateTime, Utc};

/// A go link mapping `namespace/shortpath` to a destination URL.
///
/// Visit statistics are stored alongside the link. `visits_count` is `None`
/// for links that existed before visit counting was introduced and is read
/// as zero everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub namespace: String,
    pub shortpath: String,
    pub destination_url: String,
    pub owner: String,
    pub unlisted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub visits_count: Option<i64>,
    pub visits_count_last_updated: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Returns the link as users type it, e.g. `go/wiki`.
    pub fn full_shortpath(&self) -> String {
        format!("{}/{}", self.namespace, self.shortpath)
    }

    /// Recorded visits, with an unset counter read as zero.
    pub fn visits(&self) -> i64 {
        self.visits_count.unwrap_or(0)
    }

    /// Counts one visit at `at`.
    ///
    /// Only `visits_count` and `visits_count_last_updated` are modified.
    /// Returns the count before the visit, or `None` with the link left
    /// untouched when the counter is already at `i64::MAX`.
    pub fn record_visit(&mut self, at: DateTime<Utc>) -> Option<i64> {
        let old_count = self.visits();
        let new_count = old_count.checked_add(1)?;
        self.visits_count = Some(new_count);
        self.visits_count_last_updated = Some(at);
        Some(old_count)
    }

    /// Returns true if `email` owns this link.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner.eq_ignore_ascii_case(email)
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub namespace: String,
    pub shortpath: String,
    pub destination_url: String,
    pub owner: String,
    pub unlisted: bool,
}
