//! Configuration types for the Slack adapter.
//!
//! This module defines the `adapters.slack` section of the global
//! `pewter.toml` / `pewter.yaml` configuration file.
//!
//! # Example Configuration
//!
//! ```yaml
//! adapters:
//!   slack:
//!     # Name the bot answers to; prepended to unaddressed direct messages.
//!     bot_name: hubot
//!     bot_alias: "!"
//!
//!     # Optional static directory served by `DirectoryLookup`.
//!     directory:
//!       users:
//!         - id: U0001
//!           name: bob
//!       conversations:
//!         - id: C0001
//!           name: general
//!           is_channel: true
//!         - id: D0001
//!           is_im: true
//!           user: U0001
//! ```

use serde::{Deserialize, Serialize};

use crate::model::types::{Conversation, User};

/// Slack adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Display name of the bot.
    pub bot_name: String,

    /// Alternative name the bot answers to.
    pub bot_alias: Option<String>,

    /// Static directory for the in-memory lookup.
    pub directory: DirectoryConfig,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            bot_alias: None,
            directory: DirectoryConfig::default(),
        }
    }
}

fn default_bot_name() -> String {
    "hubot".to_string()
}

impl SlackConfig {
    /// Creates a configuration for a bot named `bot_name`.
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            ..Default::default()
        }
    }

    /// Sets the bot alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.bot_alias = Some(alias.into());
        self
    }
}

/// Users and conversations known without asking Slack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub users: Vec<User>,
    pub conversations: Vec<Conversation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config: SlackConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.bot_name, "hubot");
        assert!(config.bot_alias.is_none());
        assert!(config.directory.users.is_empty());
    }

    #[test]
    fn test_directory_section() {
        let config: SlackConfig = serde_json::from_value(json!({
            "bot_name": "pewter",
            "bot_alias": "!",
            "directory": {
                "users": [{ "id": "U1", "name": "bob" }],
                "conversations": [{ "id": "D1", "is_im": true, "user": "U1" }]
            }
        }))
        .unwrap();

        assert_eq!(config.bot_name, "pewter");
        assert_eq!(config.bot_alias.as_deref(), Some("!"));
        assert_eq!(config.directory.users[0].name, "bob");
        assert!(config.directory.conversations[0].is_im);
    }
}
