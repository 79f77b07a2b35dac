//! Built-in handler counting link follows.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::{EventHandler, HandlerError};
use crate::domain::event::{Event, LINK_FOLLOW_CREATED};
use crate::domain::repositories::ShortLinkRepository;

/// How [`VisitCounterHandler`] writes the new count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterMode {
    /// Load the link, bump the counter in memory, save it back.
    ///
    /// No locking: concurrent follows of the same link can lose increments.
    #[default]
    ReadModifyWrite,
    /// Let the store increment the counter in one statement.
    Atomic,
}

impl FromStr for CounterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read_modify_write" => Ok(Self::ReadModifyWrite),
            "atomic" => Ok(Self::Atomic),
            other => Err(format!(
                "expected 'read_modify_write' or 'atomic', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for CounterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadModifyWrite => f.write_str("read_modify_write"),
            Self::Atomic => f.write_str("atomic"),
        }
    }
}

/// Increments `visits_count` on the followed link for every
/// `link_follow.created` event.
///
/// Events of other types are ignored. A missing, unparsable, or unknown
/// `link_id` is logged and skipped with `Ok(())`. Store failures come back as
/// [`HandlerError::Store`]; the emitter registers this handler so that such
/// failures are logged and absorbed.
pub struct VisitCounterHandler<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    mode: CounterMode,
}

impl<R: ShortLinkRepository + ?Sized> VisitCounterHandler<R> {
    pub fn new(repository: Arc<R>, mode: CounterMode) -> Self {
        Self { repository, mode }
    }

    async fn read_modify_write(&self, link_id: i64) -> Result<(), HandlerError> {
        let link = self
            .repository
            .get_by_id(link_id)
            .await
            .map_err(|source| HandlerError::Store { link_id, source })?;

        let Some(mut link) = link else {
            warn!(link_id, "Link not found, visit not counted");
            return Ok(());
        };

        let Some(old_count) = link.record_visit(Utc::now()) else {
            warn!(link_id, "Visit count at maximum, visit not counted");
            return Ok(());
        };

        self.repository
            .save(&link)
            .await
            .map_err(|source| HandlerError::Store { link_id, source })?;

        info!(
            link_id,
            old_count,
            new_count = link.visits(),
            "Updated visit count"
        );
        Ok(())
    }

    async fn increment(&self, link_id: i64) -> Result<(), HandlerError> {
        let new_count = self
            .repository
            .increment_visits(link_id, Utc::now())
            .await
            .map_err(|source| HandlerError::Store { link_id, source })?;

        match new_count {
            Some(new_count) => info!(link_id, new_count, "Updated visit count"),
            None => warn!(link_id, "Link not found, visit not counted"),
        }
        Ok(())
    }
}

#[async_trait]
impl<R: ShortLinkRepository + ?Sized> EventHandler for VisitCounterHandler<R> {
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        if !event.is(LINK_FOLLOW_CREATED) {
            return Ok(());
        }

        let link_id = match LinkId::from_value(event.object_field("link_id")) {
            LinkId::Missing => {
                info!(event_id = %event.id, "No link_id in event object");
                return Ok(());
            }
            LinkId::Invalid(raw) => {
                warn!(event_id = %event.id, link_id = %raw, "link_id is not an integer");
                return Ok(());
            }
            LinkId::Id(id) => id,
        };

        match self.mode {
            CounterMode::ReadModifyWrite => self.read_modify_write(link_id).await,
            CounterMode::Atomic => self.increment(link_id).await,
        }
    }

    fn name(&self) -> &str {
        "visit_counter"
    }
}

/// Outcome of reading `link_id` out of an event payload.
#[derive(Debug, PartialEq)]
enum LinkId<'a> {
    Missing,
    Invalid(&'a Value),
    Id(i64),
}

impl<'a> LinkId<'a> {
    /// Accepts JSON integers, integral floats, and strings holding an
    /// integer. Falsy values (null, false, 0, "", empty containers) count as
    /// missing.
    ///
    /// Values that would only become ids through truncating conversion are
    /// invalid: `true` is not id 1 and `4.5` is not id 4.
    fn from_value(value: Option<&'a Value>) -> Self {
        let Some(value) = value else {
            return Self::Missing;
        };

        if is_falsy(value) {
            return Self::Missing;
        }

        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match parsed {
            Some(id) => Self::Id(id),
            None => Self::Invalid(value),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
