//! Raw event normalization.
//!
//! [`SlackNormalizer`] is the adapter's entry point: it decodes a raw event,
//! looks up the users involved and builds the matching [`SlackMessage`].
//!
//! | Event | Entity |
//! |-------|--------|
//! | `message` (human subtypes) | [`SlackMessage::Text`] |
//! | `reaction_added` / `reaction_removed` | [`SlackMessage::Reaction`] |
//! | `file_shared` | [`SlackMessage::FileShared`] |
//! | `presence_change` | [`SlackMessage::Presence`] |
//!
//! Everything else normalizes to `Ok(None)`.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, trace, warn};

use pewter_core::AdapterResult;

use crate::config::SlackConfig;
use crate::lookup::Lookup;
use crate::model::entity::{
    FileSharedMessage, PresenceMessage, ReactionKind, ReactionMessage, SlackMessage,
};
use crate::model::payload::{RawFileShared, RawMessage, RawPresenceChange, RawReaction, SlackEvent};
use crate::model::text::{TextMessage, TextMessageParams};
use crate::model::types::User;

/// Message subtypes that carry human-authored text.
const TEXT_SUBTYPES: [&str; 4] = ["bot_message", "me_message", "thread_broadcast", "file_share"];

/// Turns raw Slack events into normalized entities.
#[derive(Clone)]
pub struct SlackNormalizer {
    config: SlackConfig,
    lookup: Arc<dyn Lookup>,
}

impl SlackNormalizer {
    pub fn new(config: SlackConfig, lookup: Arc<dyn Lookup>) -> Self {
        Self { config, lookup }
    }

    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    pub fn lookup(&self) -> &Arc<dyn Lookup> {
        &self.lookup
    }

    /// Normalizes a raw JSON event.
    ///
    /// # Errors
    /// Returns [`pewter_core::AdapterError::ParseError`] for malformed JSON
    /// and [`pewter_core::AdapterError::Lookup`] when a text message cannot
    /// be resolved.
    pub async fn normalize(&self, raw: &str) -> AdapterResult<Option<SlackMessage>> {
        let event = SlackEvent::parse(raw)?;
        self.normalize_event(event).await
    }

    /// Normalizes an already-parsed JSON event.
    pub async fn normalize_value(&self, value: Value) -> AdapterResult<Option<SlackMessage>> {
        let event = SlackEvent::from_value(value)?;
        self.normalize_event(event).await
    }

    /// Normalizes a decoded event.
    pub async fn normalize_event(&self, event: SlackEvent) -> AdapterResult<Option<SlackMessage>> {
        trace!(event_type = %event.type_name(), "Normalizing event");
        match event {
            SlackEvent::Message(raw) => self.normalize_message(raw).await,
            SlackEvent::ReactionAdded(raw) => {
                Ok(Some(self.normalize_reaction(ReactionKind::Added, raw).await))
            }
            SlackEvent::ReactionRemoved(raw) => {
                Ok(Some(self.normalize_reaction(ReactionKind::Removed, raw).await))
            }
            SlackEvent::FileShared(raw) => Ok(Some(self.normalize_file_shared(raw).await)),
            SlackEvent::PresenceChange(raw) => Ok(Some(self.normalize_presence(raw).await)),
            SlackEvent::Other(event_type) => {
                debug!(event_type = %event_type, "Ignoring unsupported event");
                Ok(None)
            }
        }
    }

    async fn normalize_message(&self, raw: RawMessage) -> AdapterResult<Option<SlackMessage>> {
        let subtype = raw.subtype.as_deref();
        if subtype.is_some_and(|s| !TEXT_SUBTYPES.contains(&s)) {
            debug!(subtype = ?subtype, ts = %raw.ts, "Skipping message subtype");
            return Ok(None);
        }

        let Some(sender_id) = raw.sender_id().map(str::to_owned) else {
            debug!(ts = %raw.ts, "Skipping message without sender");
            return Ok(None);
        };
        let sender = self.user_or_id(&sender_id).await;

        let params = TextMessageParams::new(sender, raw, self.config.bot_name.clone())
            .with_alias(self.config.bot_alias.clone());
        let message = TextMessage::create(params, self.lookup.as_ref()).await?;
        Ok(Some(SlackMessage::Text(message)))
    }

    async fn normalize_reaction(&self, reaction_type: ReactionKind, raw: RawReaction) -> SlackMessage {
        let item_user = async {
            match raw.item_user.as_deref() {
                Some(id) => Some(self.user_or_id(id).await),
                None => None,
            }
        };
        let (user, item_user) = futures::join!(self.user_or_id(&raw.user), item_user);

        SlackMessage::Reaction(ReactionMessage {
            reaction_type,
            user,
            reaction: raw.reaction,
            item: raw.item,
            item_user,
            event_ts: raw.event_ts,
        })
    }

    async fn normalize_file_shared(&self, raw: RawFileShared) -> SlackMessage {
        SlackMessage::FileShared(FileSharedMessage {
            user: self.user_or_id(&raw.user_id).await,
            file_id: raw.file_id,
            event_ts: raw.event_ts,
        })
    }

    async fn normalize_presence(&self, raw: RawPresenceChange) -> SlackMessage {
        let users = join_all(raw.user_ids().into_iter().map(|id| self.user_or_id(id))).await;
        SlackMessage::Presence(PresenceMessage {
            users,
            presence: raw.presence,
            event_ts: raw.event_ts,
        })
    }

    /// Looks up a user, falling back to an ID-only user.
    async fn user_or_id(&self, id: &str) -> User {
        match self.lookup.fetch_user(id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(user_id = %id, "Error getting user info {id}: {e}");
                User::from_id(id)
            }
        }
    }
}
