//! Text assembly.
//!
//! Turns raw message text into display text in four steps:
//!
//! 1. Compose the source: base text, then attachment fallbacks.
//! 2. Scan and resolve every token concurrently, joining by span position.
//! 3. Unescape `&lt;`, `&gt;` and `&amp;`.
//! 4. In a direct message, address the bot if the text does not already.
//!
//! Per-token lookup failures are absorbed by the resolver. The only failure
//! that reaches the caller is the direct-message classification itself.

use futures::future::join_all;
use tracing::{debug, error};

use pewter_core::LookupResult;

use crate::lookup::Lookup;
use crate::model::markup::{Span, tokenize};
use crate::model::mention::Mention;
use crate::model::payload::Attachment;
use crate::resolve::{Resolution, resolve_token};

/// The bot a direct message may implicitly address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotIdentity<'a> {
    pub name: &'a str,
    pub alias: Option<&'a str>,
}

impl<'a> BotIdentity<'a> {
    pub fn new(name: &'a str, alias: Option<&'a str>) -> Self {
        Self { name, alias }
    }
}

/// Display text and the mentions found while producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledText {
    pub text: String,
    /// Ordered by position in the source text.
    pub mentions: Vec<Mention>,
}

/// Joins the base text with attachment fallbacks.
///
/// Fallbacks are newline-joined (a missing fallback counts as empty) and
/// appended after a newline only when the joined string is non-empty.
pub fn compose_source_text(text: Option<&str>, attachments: &[Attachment]) -> String {
    let mut source = text.unwrap_or_default().to_string();
    if attachments.is_empty() {
        return source;
    }

    let fallbacks = attachments
        .iter()
        .map(|a| a.fallback.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");
    if !fallbacks.is_empty() {
        source.push('\n');
        source.push_str(&fallbacks);
    }
    source
}

/// Resolves all markup in `source`.
///
/// Lookups for all tokens run concurrently together with the direct-message
/// check for `conversation_id`. Results are joined in span order regardless
/// of completion order.
///
/// # Errors
/// Returns the lookup error if the conversation cannot be classified.
pub async fn assemble_text(
    source: &str,
    conversation_id: &str,
    bot: BotIdentity<'_>,
    lookup: &dyn Lookup,
) -> LookupResult<AssembledText> {
    let spans = tokenize(source).map(move |span| async move {
        match span {
            Span::Literal(text) => Resolution::literal(text),
            Span::Token(token) => resolve_token(&token, lookup).await,
        }
    });

    let (resolutions, is_direct) = futures::join!(
        join_all(spans),
        lookup.is_direct_message(conversation_id)
    );
    let is_direct = is_direct.inspect_err(|e| {
        error!(conversation_id = %conversation_id, "An error occurred while building text: {e}");
    })?;

    let mut joined = String::with_capacity(source.len());
    let mut mentions = Vec::new();
    for resolution in resolutions {
        joined.push_str(&resolution.text);
        mentions.extend(resolution.mention);
    }

    let mut text = unescape_html(&joined);
    if is_direct {
        text = address_bot(text, bot);
    }
    debug!(mentions = mentions.len(), direct = is_direct, "Assembled message text");

    Ok(AssembledText { text, mentions })
}

/// Decodes `&lt;`, `&gt;` and `&amp;`, each fully applied before the next.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Prepends the bot name unless the text already starts with it.
///
/// A leading `@` is skipped when looking for the name. The alias is
/// accepted in place of the name.
pub fn address_bot(text: String, bot: BotIdentity<'_>) -> String {
    let start = usize::from(text.starts_with('@'));
    let named_at_start = |name: &str| text.find(name) == Some(start);

    if named_at_start(bot.name) || bot.alias.is_some_and(named_at_start) {
        text
    } else {
        format!("{} {text}", bot.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pewter_core::LookupError;

    use crate::model::mention::MentionKind;
    use crate::model::types::{Conversation, User};

    const BOT: BotIdentity<'static> = BotIdentity {
        name: "bot",
        alias: None,
    };

    /// Users resolve to lowercase names after a per-user delay so later
    /// tokens can finish before earlier ones. `D1` is the only DM.
    struct SlowLookup {
        delays: Vec<(&'static str, u64)>,
        completed: Mutex<Vec<String>>,
        failing: HashSet<&'static str>,
        channels_down: bool,
    }

    impl SlowLookup {
        fn new() -> Self {
            Self {
                delays: Vec::new(),
                completed: Mutex::new(Vec::new()),
                failing: HashSet::new(),
                channels_down: false,
            }
        }

        fn delay(mut self, id: &'static str, millis: u64) -> Self {
            self.delays.push((id, millis));
            self
        }

        fn failing(mut self, id: &'static str) -> Self {
            self.failing.insert(id);
            self
        }
    }

    #[async_trait]
    impl Lookup for SlowLookup {
        async fn fetch_user(&self, id: &str) -> LookupResult<User> {
            if let Some((_, millis)) = self.delays.iter().find(|(d, _)| *d == id) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            self.completed.lock().unwrap().push(id.to_string());
            if self.failing.contains(id) {
                return Err(LookupError::Timeout);
            }
            Ok(User::new(id, id.to_lowercase()))
        }

        async fn fetch_conversation(&self, id: &str) -> LookupResult<Option<Conversation>> {
            if self.channels_down {
                return Err(LookupError::NotConnected);
            }
            Ok(match id {
                "D1" => Some(Conversation::direct("D1", "U1")),
                "C404" => None,
                _ => Some(Conversation::channel(id, "general")),
            })
        }
    }

    #[tokio::test]
    async fn test_plain_text_is_unescaped() {
        let lookup = SlowLookup::new();
        let out = assemble_text("a &lt;b&gt; &amp;amp; c", "C1", BOT, &lookup)
            .await
            .unwrap();
        assert_eq!(out.text, "a <b> &amp; c");
        assert!(out.mentions.is_empty());
    }

    #[tokio::test]
    async fn test_plain_text_is_fixed_point() {
        let lookup = SlowLookup::new();
        let once = assemble_text("just words > here", "C1", BOT, &lookup)
            .await
            .unwrap();
        let twice = assemble_text(&once.text, "C1", BOT, &lookup).await.unwrap();
        assert_eq!(once.text, "just words > here");
        assert_eq!(twice.text, once.text);
    }

    #[tokio::test]
    async fn test_order_independent_of_completion() {
        let lookup = SlowLookup::new().delay("UA", 60).delay("UB", 30);
        let out = assemble_text("<@UA>, <@UB> and <@UC>!", "C1", BOT, &lookup)
            .await
            .unwrap();

        assert_eq!(out.text, "@ua, @ub and @uc!");
        let ids: Vec<_> = out.mentions.iter().map(|m| m.id()).collect();
        assert_eq!(ids, ["UA", "UB", "UC"]);
        // The lookups really did finish out of order.
        assert_eq!(*lookup.completed.lock().unwrap(), ["UC", "UB", "UA"]);
    }

    #[tokio::test]
    async fn test_failed_token_keeps_others() {
        let lookup = SlowLookup::new().failing("U2");
        let out = assemble_text("<@U1> <@U2> <#C7|ops>", "C1", BOT, &lookup)
            .await
            .unwrap();

        assert_eq!(out.text, "@u1 <@U2> #ops");
        assert_eq!(out.mentions.len(), 2);
        assert_eq!(out.mentions[0].kind(), MentionKind::User);
        assert_eq!(out.mentions[1].kind(), MentionKind::Conversation);
    }

    #[tokio::test]
    async fn test_escaped_brackets_are_not_markup() {
        let lookup = SlowLookup::new();
        let out = assemble_text("&lt;@U1&gt; <!channel>", "C1", BOT, &lookup)
            .await
            .unwrap();
        assert_eq!(out.text, "<@U1> @channel");
        assert!(out.mentions.is_empty());
    }

    #[tokio::test]
    async fn test_direct_message_addressing() {
        let lookup = SlowLookup::new();

        let out = assemble_text("help", "D1", BOT, &lookup).await.unwrap();
        assert_eq!(out.text, "bot help");

        let out = assemble_text("@bot help", "D1", BOT, &lookup).await.unwrap();
        assert_eq!(out.text, "@bot help");

        let out = assemble_text("help", "C1", BOT, &lookup).await.unwrap();
        assert_eq!(out.text, "help");
    }

    #[tokio::test]
    async fn test_unknown_conversation_fails_batch() {
        let lookup = SlowLookup::new();
        assert!(assemble_text("hi", "C404", BOT, &lookup).await.is_err());

        let lookup = SlowLookup {
            channels_down: true,
            ..SlowLookup::new()
        };
        assert!(matches!(
            assemble_text("hi <@U1>", "C1", BOT, &lookup).await,
            Err(LookupError::NotConnected)
        ));
    }

    #[test]
    fn test_address_bot_alias() {
        let bot = BotIdentity::new("hubot", Some("!"));
        assert_eq!(address_bot("!ping".into(), bot), "!ping");
        assert_eq!(address_bot("hubot ping".into(), bot), "hubot ping");
        assert_eq!(address_bot("@hubot ping".into(), bot), "@hubot ping");
        assert_eq!(address_bot("ping".into(), bot), "hubot ping");
        // Only the first occurrence counts.
        assert_eq!(address_bot("x hubot".into(), bot), "hubot x hubot");
        assert_eq!(address_bot("".into(), bot), "hubot ");
    }

    #[test]
    fn test_compose_source_text() {
        let attachment = |fallback: Option<&str>| Attachment {
            fallback: fallback.map(str::to_string),
            ..Default::default()
        };

        assert_eq!(compose_source_text(Some("hi"), &[]), "hi");
        assert_eq!(compose_source_text(None, &[]), "");
        assert_eq!(
            compose_source_text(Some("hi"), &[attachment(Some("a")), attachment(Some("b"))]),
            "hi\na\nb"
        );
        assert_eq!(compose_source_text(Some("hi"), &[attachment(None)]), "hi");
        assert_eq!(
            compose_source_text(None, &[attachment(None), attachment(Some("b"))]),
            "\n\nb"
        );
    }
}
