//! Structured references extracted from message text.

use serde::Serialize;

use super::types::{Conversation, User};

/// What a [`Mention`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionKind {
    User,
    Conversation,
}

/// The entity a mention was resolved to through the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MentionTarget {
    User(User),
    Conversation(Conversation),
}

/// A user or conversation referenced by a message.
///
/// Mentions built from a labeled token (`<@U1|bob>`) carry no resolved
/// entity; mentions built from a successful lookup carry the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    id: String,
    kind: MentionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<MentionTarget>,
}

impl Mention {
    /// A user mention resolved from an inline label only.
    pub fn labeled_user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MentionKind::User,
            resolved: None,
        }
    }

    /// A conversation mention resolved from an inline label only.
    pub fn labeled_conversation(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MentionKind::Conversation,
            resolved: None,
        }
    }

    /// A user mention backed by a looked-up user.
    pub fn user(user: User) -> Self {
        Self {
            id: user.id.clone(),
            kind: MentionKind::User,
            resolved: Some(MentionTarget::User(user)),
        }
    }

    /// A conversation mention backed by a looked-up conversation.
    pub fn conversation(conversation: Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            kind: MentionKind::Conversation,
            resolved: Some(MentionTarget::Conversation(conversation)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> MentionKind {
        self.kind
    }

    /// Returns the looked-up entity, if resolution went through the lookup service.
    pub fn resolved(&self) -> Option<&MentionTarget> {
        self.resolved.as_ref()
    }

    /// Returns the looked-up user, if this is a resolved user mention.
    pub fn resolved_user(&self) -> Option<&User> {
        match &self.resolved {
            Some(MentionTarget::User(user)) => Some(user),
            _ => None,
        }
    }

    /// Returns the looked-up conversation, if this is a resolved conversation mention.
    pub fn resolved_conversation(&self) -> Option<&Conversation> {
        match &self.resolved {
            Some(MentionTarget::Conversation(conversation)) => Some(conversation),
            _ => None,
        }
    }
}
