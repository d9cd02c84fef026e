//! Raw Slack event payloads.
//!
//! These types are decoded straight from the Events API / RTM JSON and are
//! never mutated afterwards. [`SlackEvent::parse`] inspects the `type`
//! discriminator first and decodes the **most specific** payload for it.
//!
//! # Example
//!
//! ```rust,ignore
//! use pewter_adapter_slack::SlackEvent;
//!
//! match SlackEvent::parse(r#"{"type":"message","text":"hi","ts":"1.0","channel":"C1"}"#)? {
//!     SlackEvent::Message(msg) => println!("text: {:?}", msg.text),
//!     other => println!("ignored {}", other.type_name()),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Message
// ============================================================================

/// A raw `message` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message subtype (`bot_message`, `message_changed`, ...).
    #[serde(default)]
    pub subtype: Option<String>,
    /// Author user ID.
    #[serde(default)]
    pub user: Option<String>,
    /// Author bot ID for `bot_message`.
    #[serde(default)]
    pub bot_id: Option<String>,
    /// Display name override for `bot_message`.
    #[serde(default)]
    pub username: Option<String>,
    /// Message body in Slack markup.
    #[serde(default)]
    pub text: Option<String>,
    /// Message timestamp, unique per channel.
    #[serde(default)]
    pub ts: String,
    /// Parent message timestamp when posted in a thread.
    #[serde(default)]
    pub thread_ts: Option<String>,
    /// Conversation the message was posted to.
    #[serde(default)]
    pub channel: String,
    /// Legacy attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl RawMessage {
    /// The author ID, falling back to `bot_id` for bot posts.
    pub fn sender_id(&self) -> Option<&str> {
        self.user.as_deref().or(self.bot_id.as_deref())
    }
}

/// A legacy message attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain-text summary shown by clients that cannot render the attachment.
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_link: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

// ============================================================================
// Reaction
// ============================================================================

/// The item a reaction was added to or removed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionItem {
    /// Item type (`message`, `file`, `file_comment`).
    #[serde(rename = "type")]
    pub item_type: String,
    /// Channel of a message item.
    #[serde(default)]
    pub channel: Option<String>,
    /// Timestamp of a message item.
    #[serde(default)]
    pub ts: Option<String>,
    /// File ID of a file item.
    #[serde(default)]
    pub file: Option<String>,
}

/// A raw `reaction_added` / `reaction_removed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReaction {
    /// User who reacted.
    pub user: String,
    /// Emoji name without colons.
    pub reaction: String,
    /// Author of the reacted item.
    #[serde(default)]
    pub item_user: Option<String>,
    pub item: ReactionItem,
    #[serde(default)]
    pub event_ts: String,
}

// ============================================================================
// File share
// ============================================================================

/// A raw `file_shared` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFileShared {
    /// User who shared the file.
    pub user_id: String,
    pub file_id: String,
    #[serde(default)]
    pub event_ts: String,
}

// ============================================================================
// Presence
// ============================================================================

/// Presence state reported by `presence_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    Active,
    Away,
}

/// A raw `presence_change` event.
///
/// Slack sends either a single `user` or a batched `users` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPresenceChange {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub users: Vec<String>,
    pub presence: PresenceState,
    #[serde(default)]
    pub event_ts: String,
}

impl RawPresenceChange {
    /// Returns every affected user ID, batched or single.
    pub fn user_ids(&self) -> Vec<&str> {
        if self.users.is_empty() {
            self.user.as_deref().into_iter().collect()
        } else {
            self.users.iter().map(String::as_str).collect()
        }
    }
}

// ============================================================================
// SlackEvent - type dispatch
// ============================================================================

/// A decoded raw event, dispatched on its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum SlackEvent {
    /// `message`
    Message(RawMessage),
    /// `reaction_added`
    ReactionAdded(RawReaction),
    /// `reaction_removed`
    ReactionRemoved(RawReaction),
    /// `file_shared`
    FileShared(RawFileShared),
    /// `presence_change`
    PresenceChange(RawPresenceChange),
    /// Any other event type; the payload is not decoded.
    Other(String),
}

impl SlackEvent {
    /// Parses a raw JSON event.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    /// Decodes an already-parsed JSON event.
    pub fn from_value(v: Value) -> serde_json::Result<Self> {
        let event_type = v
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(match event_type.as_str() {
            "message" => Self::Message(serde_json::from_value(v)?),
            "reaction_added" => Self::ReactionAdded(serde_json::from_value(v)?),
            "reaction_removed" => Self::ReactionRemoved(serde_json::from_value(v)?),
            "file_shared" => Self::FileShared(serde_json::from_value(v)?),
            "presence_change" => Self::PresenceChange(serde_json::from_value(v)?),
            _ => Self::Other(event_type),
        })
    }

    /// Returns the `type` discriminator this event was decoded from.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Message(_) => "message",
            Self::ReactionAdded(_) => "reaction_added",
            Self::ReactionRemoved(_) => "reaction_removed",
            Self::FileShared(_) => "file_shared",
            Self::PresenceChange(_) => "presence_change",
            Self::Other(name) => name,
        }
    }
}
