//! Data models for Slack events.
//!
//! Raw payloads come in through [`payload`]; normalized entities go out
//! through [`entity`]. Text messages additionally pass through the markup
//! scanner in [`markup`].

pub mod entity;
pub mod markup;
pub mod mention;
pub mod payload;
pub mod text;
pub mod types;

pub use entity::{FileSharedMessage, PresenceMessage, ReactionKind, ReactionMessage, SlackMessage};
pub use markup::{MarkupToken, Scanner, Sigil, Span, scan, tokenize};
pub use mention::{Mention, MentionKind, MentionTarget};
pub use payload::{
    Attachment, PresenceState, RawFileShared, RawMessage, RawPresenceChange, RawReaction,
    ReactionItem, SlackEvent,
};
pub use text::{ResolutionState, TextMessage, TextMessageParams, create_text_message};
pub use types::{Conversation, User};
