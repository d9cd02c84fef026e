//! Entity lookup collaborators.
//!
//! Text normalization resolves opaque IDs (`U123`, `C456`) into users and
//! conversations through a [`Lookup`]. The normalizer holds an
//! `Arc<dyn Lookup>` and never knows how lookups are served.
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`ApiLookup`] | Slack Web API methods through an [`ApiCaller`] |
//! | [`DirectoryLookup`] | In-memory directory, usually loaded from config |
//!
//! Timeouts, retries and caching belong to the implementation.

mod api;
mod directory;

pub use api::{ApiCaller, ApiLookup};
pub use directory::DirectoryLookup;

use async_trait::async_trait;
use pewter_core::{LookupError, LookupResult};

use crate::model::types::{Conversation, User};

/// Resolves platform IDs into directory entities.
///
/// Failures are reported as `Err`; a conversation that does not exist is
/// `Ok(None)`, which callers treat differently from a failure.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Fetches a user by ID.
    async fn fetch_user(&self, id: &str) -> LookupResult<User>;

    /// Fetches a conversation by ID, `None` if it does not exist.
    async fn fetch_conversation(&self, id: &str) -> LookupResult<Option<Conversation>>;

    /// Returns whether `conversation_id` is a direct message with the bot.
    ///
    /// The default implementation fetches the conversation and reads its
    /// `is_im` flag; an unknown conversation is an error.
    async fn is_direct_message(&self, conversation_id: &str) -> LookupResult<bool> {
        match self.fetch_conversation(conversation_id).await? {
            Some(conversation) => Ok(conversation.is_im),
            None => Err(LookupError::api("channel_not_found")),
        }
    }
}
