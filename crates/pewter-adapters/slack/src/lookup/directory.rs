//! In-memory [`Lookup`].

use std::collections::HashMap;

use async_trait::async_trait;
use pewter_core::{LookupError, LookupResult};

use super::Lookup;
use crate::config::DirectoryConfig;
use crate::model::types::{Conversation, User};

/// A fixed directory of users and conversations.
///
/// Unknown users are reported as `user_not_found`, unknown conversations as
/// `Ok(None)`, matching what the Web API answers.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLookup {
    users: HashMap<String, User>,
    conversations: HashMap<String, Conversation>,
}

impl DirectoryLookup {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from configuration.
    pub fn from_config(config: &DirectoryConfig) -> Self {
        let mut lookup = Self::new();
        for user in &config.users {
            lookup.users.insert(user.id.clone(), user.clone());
        }
        for conversation in &config.conversations {
            lookup
                .conversations
                .insert(conversation.id.clone(), conversation.clone());
        }
        lookup
    }

    /// Adds a user.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Adds a conversation.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversations
            .insert(conversation.id.clone(), conversation);
        self
    }
}

#[async_trait]
impl Lookup for DirectoryLookup {
    async fn fetch_user(&self, id: &str) -> LookupResult<User> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::api("user_not_found"))
    }

    async fn fetch_conversation(&self, id: &str) -> LookupResult<Option<Conversation>> {
        Ok(self.conversations.get(id).cloned())
    }
}
