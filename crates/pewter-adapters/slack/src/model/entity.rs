//! Normalized Slack entities.
//!
//! [`SlackMessage`] is the closed set of entities the adapter produces. Only
//! [`TextMessage`] goes through markup resolution; the other variants are
//! complete as soon as they are built.

use std::any::Any;

use serde::Serialize;

use pewter_core::{BoxedEvent, Event, EventType};

use super::payload::{PresenceState, ReactionItem};
use super::text::TextMessage;
use super::types::User;

/// Any normalized Slack entity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlackMessage {
    Text(TextMessage),
    Reaction(ReactionMessage),
    FileShared(FileSharedMessage),
    Presence(PresenceMessage),
}

impl SlackMessage {
    /// The user behind the event. Presence changes report their first
    /// affected user.
    pub fn sender(&self) -> Option<&User> {
        match self {
            Self::Text(m) => Some(m.sender()),
            Self::Reaction(m) => Some(&m.user),
            Self::FileShared(m) => Some(&m.user),
            Self::Presence(m) => m.users.first(),
        }
    }

    pub fn timestamp(&self) -> &str {
        self.as_event().timestamp()
    }

    /// Borrows the entity as a host event.
    pub fn as_event(&self) -> &dyn Event {
        match self {
            Self::Text(m) => m,
            Self::Reaction(m) => m,
            Self::FileShared(m) => m,
            Self::Presence(m) => m,
        }
    }

    /// Boxes the inner entity so consumers can downcast to its concrete type.
    pub fn into_boxed(self) -> BoxedEvent {
        match self {
            Self::Text(m) => BoxedEvent::new(m),
            Self::Reaction(m) => BoxedEvent::new(m),
            Self::FileShared(m) => BoxedEvent::new(m),
            Self::Presence(m) => BoxedEvent::new(m),
        }
    }
}

impl From<TextMessage> for SlackMessage {
    fn from(m: TextMessage) -> Self {
        Self::Text(m)
    }
}

// ============================================================================
// Reactions
// ============================================================================

/// Whether a reaction was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Added,
    Removed,
}

/// An emoji reaction added to or removed from an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionMessage {
    pub reaction_type: ReactionKind,
    /// The reacting user.
    pub user: User,
    /// Emoji name without colons.
    pub reaction: String,
    pub item: ReactionItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_user: Option<User>,
    pub event_ts: String,
}

impl Event for ReactionMessage {
    fn event_name(&self) -> &'static str {
        match self.reaction_type {
            ReactionKind::Added => "reaction_added",
            ReactionKind::Removed => "reaction_removed",
        }
    }

    fn platform(&self) -> &'static str {
        "slack"
    }

    fn event_type(&self) -> EventType {
        EventType::Notice
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn sender_id(&self) -> Option<&str> {
        Some(&self.user.id)
    }

    fn timestamp(&self) -> &str {
        &self.event_ts
    }
}

// ============================================================================
// File shares
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSharedMessage {
    pub user: User,
    pub file_id: String,
    pub event_ts: String,
}

impl Event for FileSharedMessage {
    fn event_name(&self) -> &'static str {
        "file_shared"
    }

    fn platform(&self) -> &'static str {
        "slack"
    }

    fn event_type(&self) -> EventType {
        EventType::Notice
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn sender_id(&self) -> Option<&str> {
        Some(&self.user.id)
    }

    fn timestamp(&self) -> &str {
        &self.event_ts
    }
}

// ============================================================================
// Presence
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceMessage {
    pub users: Vec<User>,
    pub presence: PresenceState,
    pub event_ts: String,
}

impl Event for PresenceMessage {
    fn event_name(&self) -> &'static str {
        "presence_change"
    }

    fn platform(&self) -> &'static str {
        "slack"
    }

    fn event_type(&self) -> EventType {
        EventType::Presence
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn sender_id(&self) -> Option<&str> {
        self.users.first().map(|u| u.id.as_str())
    }

    fn timestamp(&self) -> &str {
        &self.event_ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reaction() -> ReactionMessage {
        ReactionMessage {
            reaction_type: ReactionKind::Removed,
            user: User::new("U1", "bob"),
            reaction: "thumbsup".into(),
            item: ReactionItem {
                item_type: "message".into(),
                channel: Some("C1".into()),
                ts: Some("1.0".into()),
                file: None,
            },
            item_user: None,
            event_ts: "2.0".into(),
        }
    }

    #[test]
    fn test_serialized_reaction_keeps_variant_tag() {
        let json = serde_json::to_string(&SlackMessage::Reaction(reaction())).unwrap();
        assert_eq!(json.matches("\"kind\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], json!("reaction"));
        assert_eq!(value["reaction_type"], json!("removed"));
        assert_eq!(value["reaction"], json!("thumbsup"));
    }

    #[test]
    fn test_boxed_entity_downcasts_to_variant() {
        let message = SlackMessage::Reaction(reaction());
        assert_eq!(message.sender().map(|u| u.name.as_str()), Some("bob"));
        assert_eq!(message.timestamp(), "2.0");

        let boxed = message.into_boxed();
        assert_eq!(boxed.event_name(), "reaction_removed");
        assert_eq!(boxed.event_type(), EventType::Notice);
        assert_eq!(
            boxed.downcast_ref::<ReactionMessage>().map(|r| r.reaction.as_str()),
            Some("thumbsup")
        );
        assert!(boxed.plain_text().is_none());
    }

    #[test]
    fn test_serialized_kind_tag() {
        let value = serde_json::to_value(SlackMessage::Presence(PresenceMessage {
            users: vec![User::from_id("U1")],
            presence: PresenceState::Away,
            event_ts: "3.0".into(),
        }))
        .unwrap();

        assert_eq!(value["kind"], json!("presence"));
        assert_eq!(value["presence"], json!("away"));
        assert_eq!(value["users"][0]["id"], json!("U1"));
    }

    #[test]
    fn test_presence_without_users_has_no_sender() {
        let message = SlackMessage::Presence(PresenceMessage {
            users: Vec::new(),
            presence: PresenceState::Active,
            event_ts: "4.0".into(),
        });
        assert!(message.sender().is_none());
        assert!(message.as_event().sender_id().is_none());
    }
}
