//! Event record dispatched to event handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Event type emitted when a short link is followed.
pub const LINK_FOLLOW_CREATED: &str = "link_follow.created";

/// Something that happened, described for event handlers.
///
/// Built by [`crate::application::services::EventEmitter`] and handed to every
/// handler by shared reference, so handlers cannot alter what later handlers
/// see. Events are not persisted.
///
/// Serializes to:
///
/// ```json
/// {
///   "id": "3f2b...",
///   "type": "link_follow.created",
///   "created": "2025-01-01T12:00:00Z",
///   "organization": "org1",
///   "data": {
///     "object": { "object": "link_follow", "link_id": 42 },
///     "user": { "object": "user", "email": "alice@example.com" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created: DateTime<Utc>,
    pub organization: String,
    pub data: EventData,
}

/// Payload of an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventData {
    pub object: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<EventUser>,
}

/// The actor attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventUser {
    pub object: String,
    pub email: String,
}

impl EventUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            object: "user".to_string(),
            email: email.into(),
        }
    }
}

impl Event {
    /// Creates an event with a fresh random id.
    pub fn new(
        organization: impl Into<String>,
        event_type: impl Into<String>,
        object: Map<String, Value>,
        user: Option<EventUser>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            event_type: event_type.into(),
            created,
            organization: organization.into(),
            data: EventData { object, user },
        }
    }

    /// Returns true if this event has the given type.
    pub fn is(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }

    /// Looks up a field of `data.object`.
    pub fn object_field(&self, name: &str) -> Option<&Value> {
        self.data.object.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test object must be a JSON object"),
        }
    }

    #[test]
    fn test_event_ids_are_unique_hex() {
        let a = Event::new("org1", "t", Map::new(), None, Utc::now());
        let b = Event::new("org1", "t", Map::new(), None, Utc::now());

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_event_serializes_without_user() {
        let event = Event::new(
            "org1",
            LINK_FOLLOW_CREATED,
            object(json!({"object": "link_follow", "link_id": 42})),
            None,
            Utc::now(),
        );

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "link_follow.created");
        assert_eq!(value["organization"], "org1");
        assert_eq!(value["data"]["object"]["link_id"], 42);
        assert!(value["data"].get("user").is_none());
    }

    #[test]
    fn test_event_serializes_user() {
        let event = Event::new(
            "org1",
            LINK_FOLLOW_CREATED,
            Map::new(),
            Some(EventUser::new("alice@example.com")),
            Utc::now(),
        );

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["data"]["user"]["object"], "user");
        assert_eq!(value["data"]["user"]["email"], "alice@example.com");
    }

    #[test]
    fn test_object_field_and_is() {
        let event = Event::new(
            "org1",
            LINK_FOLLOW_CREATED,
            object(json!({"link_id": "7"})),
            None,
            Utc::now(),
        );

        assert!(event.is(LINK_FOLLOW_CREATED));
        assert!(!event.is("link.created"));
        assert_eq!(event.object_field("link_id"), Some(&json!("7")));
        assert!(event.object_field("missing").is_none());
    }
}
