//! Text messages and their resolution lifecycle.
//!
//! A [`TextMessage`] is built from a raw payload and then resolved once:
//!
//! ```text
//! Pending ──▶ Resolving ──▶ Complete
//!    │                 └──▶ Failed
//!    └── text supplied ───▶ Complete
//! ```
//!
//! Callers never see a pending message: [`TextMessage::create`] and
//! [`create_text_message`] only hand out the result of the resolution pass.

use std::any::Any;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use pewter_core::{AdapterError, AdapterResult, Event, EventType};

use crate::assemble::{BotIdentity, assemble_text, compose_source_text};
use crate::lookup::Lookup;
use crate::model::mention::Mention;
use crate::model::payload::RawMessage;
use crate::model::types::User;

/// Where a text message is in its one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    Pending,
    Resolving,
    Complete,
    Failed,
}

/// Everything needed to build a [`TextMessage`].
#[derive(Debug, Clone, Default)]
pub struct TextMessageParams {
    pub sender: User,
    /// Already-normalized text. When present, no resolution happens.
    pub text: Option<String>,
    /// Mentions that accompany a supplied `text`.
    pub mentions: Vec<Mention>,
    /// Raw text overriding the payload's own `text`.
    pub raw_text: Option<String>,
    pub raw: RawMessage,
    pub conversation_id: String,
    pub bot_name: String,
    pub bot_alias: Option<String>,
}

impl TextMessageParams {
    /// Parameters for a raw payload, taking the conversation from it.
    pub fn new(sender: User, raw: RawMessage, bot_name: impl Into<String>) -> Self {
        Self {
            sender,
            conversation_id: raw.channel.clone(),
            raw,
            bot_name: bot_name.into(),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.bot_alias = alias;
        self
    }

    /// Supplies normalized text, skipping resolution.
    pub fn with_text(mut self, text: impl Into<String>, mentions: Vec<Mention>) -> Self {
        self.text = Some(text.into());
        self.mentions = mentions;
        self
    }
}

/// A human-authored message with resolved markup.
#[derive(Debug, Clone, Serialize)]
pub struct TextMessage {
    sender: User,
    raw_text: String,
    text: Option<String>,
    mentions: Vec<Mention>,
    ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<String>,
    conversation_id: String,
    #[serde(skip)]
    bot_name: String,
    #[serde(skip)]
    bot_alias: Option<String>,
    #[serde(skip)]
    raw: RawMessage,
    state: ResolutionState,
}

impl TextMessage {
    fn new(params: TextMessageParams) -> Self {
        let TextMessageParams {
            sender,
            text,
            mentions,
            raw_text,
            raw,
            conversation_id,
            bot_name,
            bot_alias,
        } = params;

        Self {
            sender,
            raw_text: raw_text.or_else(|| raw.text.clone()).unwrap_or_default(),
            text,
            mentions,
            ts: raw.ts.clone(),
            thread_ts: raw.thread_ts.clone(),
            conversation_id,
            bot_name,
            bot_alias,
            raw,
            state: ResolutionState::Pending,
        }
    }

    /// Builds and resolves a text message.
    ///
    /// # Errors
    /// Fails only when the lookup cannot classify the conversation.
    pub async fn create(params: TextMessageParams, lookup: &dyn Lookup) -> AdapterResult<Self> {
        let mut message = Self::new(params);
        message.resolve(lookup).await?;
        Ok(message)
    }

    /// Runs the resolution pass.
    ///
    /// A message built with text completes without scanning or lookups.
    ///
    /// # Errors
    /// Returns [`AdapterError::AlreadyResolved`] on any call after the
    /// first, and [`AdapterError::Lookup`] when assembly fails.
    async fn resolve(&mut self, lookup: &dyn Lookup) -> AdapterResult<()> {
        if self.state != ResolutionState::Pending {
            return Err(AdapterError::AlreadyResolved);
        }
        if self.text.is_some() {
            self.state = ResolutionState::Complete;
            return Ok(());
        }

        self.state = ResolutionState::Resolving;
        let source = compose_source_text(Some(&self.raw_text), &self.raw.attachments);
        let bot = BotIdentity::new(&self.bot_name, self.bot_alias.as_deref());

        match assemble_text(&source, &self.conversation_id, bot, lookup).await {
            Ok(assembled) => {
                debug!(ts = %self.ts, mentions = assembled.mentions.len(), "Text message resolved");
                self.text = Some(assembled.text);
                self.mentions = assembled.mentions;
                self.state = ResolutionState::Complete;
                Ok(())
            }
            Err(e) => {
                self.state = ResolutionState::Failed;
                Err(e.into())
            }
        }
    }

    pub fn sender(&self) -> &User {
        &self.sender
    }

    /// Returns the normalized text.
    ///
    /// # Errors
    /// Returns [`AdapterError::NotResolved`] unless resolution completed.
    pub fn text(&self) -> AdapterResult<&str> {
        match (&self.text, self.state) {
            (Some(text), ResolutionState::Complete) => Ok(text),
            _ => Err(AdapterError::NotResolved),
        }
    }

    /// Mentions in source order.
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn timestamp(&self) -> &str {
        &self.ts
    }

    pub fn thread_ts(&self) -> Option<&str> {
        self.thread_ts.as_deref()
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn raw(&self) -> &RawMessage {
        &self.raw
    }
}

impl Event for TextMessage {
    fn event_name(&self) -> &'static str {
        "message"
    }

    fn platform(&self) -> &'static str {
        "slack"
    }

    fn event_type(&self) -> EventType {
        EventType::Message
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn sender_id(&self) -> Option<&str> {
        Some(&self.sender.id)
    }

    fn timestamp(&self) -> &str {
        &self.ts
    }

    fn plain_text(&self) -> Option<&str> {
        self.text().ok()
    }
}

/// Builds a text message in the background and reports the outcome.
///
/// `callback` runs exactly once, on a spawned task, so it is never invoked
/// before this function returns, even when no lookups are needed.
pub fn create_text_message<F>(
    params: TextMessageParams,
    lookup: Arc<dyn Lookup>,
    callback: F,
) -> JoinHandle<()>
where
    F: FnOnce(AdapterResult<TextMessage>) + Send + 'static,
{
    tokio::spawn(async move {
        let result = TextMessage::create(params, lookup.as_ref()).await;
        if let Err(e) = &result {
            error!("Failed to create text message: {e}");
        }
        callback(result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    use crate::lookup::DirectoryLookup;
    use crate::model::payload::Attachment;
    use crate::model::types::Conversation;

    fn directory() -> DirectoryLookup {
        DirectoryLookup::new()
            .with_user(User::new("U1", "bob"))
            .with_conversation(Conversation::channel("C1", "general"))
            .with_conversation(Conversation::direct("D1", "U1"))
    }

    fn raw(channel: &str, text: &str) -> RawMessage {
        RawMessage {
            user: Some("U1".into()),
            text: Some(text.into()),
            ts: "1700000000.000100".into(),
            channel: channel.into(),
            ..Default::default()
        }
    }

    fn params(channel: &str, text: &str) -> TextMessageParams {
        TextMessageParams::new(User::new("U1", "bob"), raw(channel, text), "bot")
    }

    #[tokio::test]
    async fn test_create_resolves_markup() {
        let message = TextMessage::create(params("C1", "hi <@U1> in <#C1>"), &directory())
            .await
            .unwrap();

        assert_eq!(message.state(), ResolutionState::Complete);
        assert_eq!(message.text().unwrap(), "hi @bob in #general");
        assert_eq!(message.raw_text(), "hi <@U1> in <#C1>");
        assert_eq!(message.mentions().len(), 2);
        assert_eq!(message.plain_text(), Some("hi @bob in #general"));
        assert_eq!(message.sender_id(), Some("U1"));
    }

    #[tokio::test]
    async fn test_attachments_are_appended() {
        let mut p = params("C1", "see");
        p.raw.attachments = vec![Attachment {
            fallback: Some("&lt;report&gt; by <@U1>".into()),
            ..Default::default()
        }];

        let message = TextMessage::create(p, &directory()).await.unwrap();
        assert_eq!(message.text().unwrap(), "see\n<report> by @bob");
        assert_eq!(message.raw_text(), "see");
    }

    #[tokio::test]
    async fn test_direct_message_is_addressed() {
        let message = TextMessage::create(params("D1", "help"), &directory())
            .await
            .unwrap();
        assert_eq!(message.text().unwrap(), "bot help");
    }

    #[tokio::test]
    async fn test_supplied_text_skips_lookups() {
        // An empty directory fails every lookup, so any call would show.
        let p = params("C404", "<@U1>").with_text("already done", Vec::new());
        let message = TextMessage::create(p, &DirectoryLookup::new()).await.unwrap();

        assert_eq!(message.state(), ResolutionState::Complete);
        assert_eq!(message.text().unwrap(), "already done");
        assert!(message.mentions().is_empty());
    }

    #[tokio::test]
    async fn test_second_resolution_is_rejected() {
        let lookup = directory();
        let mut message = TextMessage::new(params("C1", "hi"));
        message.resolve(&lookup).await.unwrap();

        assert!(matches!(
            message.resolve(&lookup).await,
            Err(AdapterError::AlreadyResolved)
        ));
        assert_eq!(message.text().unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_failed_resolution() {
        let lookup = directory();
        let mut message = TextMessage::new(params("C404", "hi"));

        assert!(matches!(
            message.resolve(&lookup).await,
            Err(AdapterError::Lookup(_))
        ));
        assert_eq!(message.state(), ResolutionState::Failed);
        assert!(matches!(message.text(), Err(AdapterError::NotResolved)));
        assert!(message.plain_text().is_none());
    }

    #[tokio::test]
    async fn test_callback_runs_once_after_return() {
        let lookup: Arc<dyn Lookup> = Arc::new(directory());
        let called = Arc::new(AtomicBool::new(false));
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let flag = called.clone();
        let counter = calls.clone();
        let handle = create_text_message(
            params("C1", "nothing to resolve").with_text("nothing to resolve", Vec::new()),
            lookup,
            move |result| {
                flag.store(true, Ordering::SeqCst);
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(result);
            },
        );

        // The single-threaded test runtime has not run the task yet.
        assert!(!called.load(Ordering::SeqCst));

        let message = rx.await.unwrap().unwrap();
        handle.await.unwrap();
        assert_eq!(message.text().unwrap(), "nothing to resolve");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_callback_receives_error() {
        let lookup: Arc<dyn Lookup> = Arc::new(DirectoryLookup::new());
        let (tx, rx) = oneshot::channel();

        create_text_message(params("C1", "hi"), lookup, move |result| {
            let _ = tx.send(result);
        });

        assert!(rx.await.unwrap().is_err());
    }
}
