//! Directory entities returned by the lookup service.
//!
//! These mirror the `user` and `channel` objects of the Slack Web API.
//! Unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// User ID (e.g. `U012AB3CD`).
    pub id: String,
    /// Handle shown after `@`.
    #[serde(default)]
    pub name: String,
    /// Full name, if the profile has one.
    #[serde(default)]
    pub real_name: Option<String>,
    /// Whether this member is a bot user.
    #[serde(default)]
    pub is_bot: bool,
    /// Whether the account has been deactivated.
    #[serde(default)]
    pub deleted: bool,
}

impl User {
    /// Creates a user known only by its ID.
    ///
    /// Used when a sender cannot be looked up; the ID doubles as the name.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Default::default()
        }
    }

    /// Creates a user with an ID and handle.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A channel, private group, or direct-message conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation ID (e.g. `C012AB3CD`, `D012AB3CD`).
    pub id: String,
    /// Channel name. Direct-message conversations have none.
    #[serde(default)]
    pub name: String,
    /// Public channel.
    #[serde(default)]
    pub is_channel: bool,
    /// Private channel.
    #[serde(default)]
    pub is_group: bool,
    /// Direct message between the bot and one user.
    #[serde(default)]
    pub is_im: bool,
    /// Multi-party direct message.
    #[serde(default)]
    pub is_mpim: bool,
    /// The other member of a direct message.
    #[serde(default)]
    pub user: Option<String>,
}

impl Conversation {
    /// Creates a public channel.
    pub fn channel(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_channel: true,
            ..Default::default()
        }
    }

    /// Creates a direct-message conversation with `user`.
    pub fn direct(id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_im: true,
            user: Some(user.into()),
            ..Default::default()
        }
    }
}
