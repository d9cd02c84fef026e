//! Markup token resolution.
//!
//! Each [`MarkupToken`] resolves to the text that replaces it and at most one
//! [`Mention`]. Dispatch is by sigil:
//!
//! | Token | Replacement | Mention |
//! |-------|-------------|---------|
//! | `<@U1\|bob>` | `@bob` | user, unresolved |
//! | `<@U1>` | `@` + looked-up name, else `<@U1>` | user, resolved (none on failure) |
//! | `<#C1\|general>` | `#general` | conversation, unresolved |
//! | `<#C1>` | `#` + looked-up name, else `<#C1>` | conversation, resolved (none on failure) |
//! | `<!here>` | `@here` | none |
//! | `<!foo\|label>` | `label` | none |
//! | `<http://x\|site>` | `site (http://x)` | none |
//!
//! Lookup failures are logged and absorbed here; they never fail the message.

use std::borrow::Cow;

use tracing::error;

use crate::lookup::Lookup;
use crate::model::markup::{MarkupToken, Sigil};
use crate::model::mention::Mention;

/// Keywords that `<!...>` turns into broadcast markers.
pub const BROADCAST_KEYWORDS: [&str; 4] = ["channel", "group", "everyone", "here"];

/// The outcome of resolving one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub text: Cow<'a, str>,
    pub mention: Option<Mention>,
}

impl<'a> Resolution<'a> {
    /// Text kept verbatim.
    pub fn literal(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            mention: None,
        }
    }

    fn replaced(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            mention: None,
        }
    }

    fn with_mention(text: String, mention: Mention) -> Self {
        Self {
            text: Cow::Owned(text),
            mention: Some(mention),
        }
    }
}

/// Resolves one markup token, calling the lookup service when needed.
pub async fn resolve_token<'a>(token: &MarkupToken<'a>, lookup: &dyn Lookup) -> Resolution<'a> {
    match (token.sigil, token.label) {
        (Some(Sigil::User), Some(label)) => Resolution::with_mention(
            format!("@{label}"),
            Mention::labeled_user(token.reference),
        ),
        (Some(Sigil::User), None) => resolve_user(token.reference, lookup).await,
        (Some(Sigil::Conversation), Some(label)) => Resolution::with_mention(
            format!("#{label}"),
            Mention::labeled_conversation(token.reference),
        ),
        (Some(Sigil::Conversation), None) => resolve_conversation(token.reference, lookup).await,
        (Some(Sigil::Special), label) => resolve_special(token, label),
        (None, label) => resolve_link(token.reference, label),
    }
}

async fn resolve_user<'a>(id: &str, lookup: &dyn Lookup) -> Resolution<'a> {
    match lookup.fetch_user(id).await {
        Ok(user) => Resolution::with_mention(format!("@{}", user.name), Mention::user(user)),
        Err(e) => {
            error!(user_id = %id, "Error getting user info {id}: {e}");
            Resolution::replaced(format!("<@{id}>"))
        }
    }
}

async fn resolve_conversation<'a>(id: &str, lookup: &dyn Lookup) -> Resolution<'a> {
    match lookup.fetch_conversation(id).await {
        Ok(Some(conversation)) => Resolution::with_mention(
            format!("#{}", conversation.name),
            Mention::conversation(conversation),
        ),
        Ok(None) => {
            error!(conversation_id = %id, "Error getting conversation info {id}: not found");
            Resolution::replaced(format!("<#{id}>"))
        }
        Err(e) => {
            error!(conversation_id = %id, "Error getting conversation info {id}: {e}");
            Resolution::replaced(format!("<#{id}>"))
        }
    }
}

fn resolve_special<'a>(token: &MarkupToken<'a>, label: Option<&'a str>) -> Resolution<'a> {
    if BROADCAST_KEYWORDS.contains(&token.reference) {
        Resolution::replaced(format!("@{}", token.reference))
    } else if let Some(label) = label {
        Resolution::replaced(label)
    } else {
        Resolution::replaced(token.source)
    }
}

fn resolve_link<'a>(reference: &'a str, label: Option<&'a str>) -> Resolution<'a> {
    let link = reference.strip_prefix("mailto:").unwrap_or(reference);
    match label {
        Some(label) if !link.contains(label) => Resolution::replaced(format!("{label} ({link})")),
        _ => Resolution::replaced(link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pewter_core::{LookupError, LookupResult};

    use crate::model::markup::{Span, tokenize};
    use crate::model::mention::MentionKind;
    use crate::model::types::{Conversation, User};

    /// Knows `U1`/bob and `C1`/general; fails `U2`/`C2`; everything else is missing.
    #[derive(Default)]
    struct MockLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Lookup for MockLookup {
        async fn fetch_user(&self, id: &str) -> LookupResult<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match id {
                "U1" => Ok(User::new("U1", "bob")),
                _ => Err(LookupError::api("user_not_found")),
            }
        }

        async fn fetch_conversation(&self, id: &str) -> LookupResult<Option<Conversation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match id {
                "C1" => Ok(Some(Conversation::channel("C1", "general"))),
                "C2" => Err(LookupError::Timeout),
                _ => Ok(None),
            }
        }
    }

    async fn resolve(text: &str, lookup: &MockLookup) -> Resolution<'static> {
        let span = tokenize(text).next().unwrap();
        let Span::Token(token) = span else {
            panic!("expected a token in {text:?}");
        };
        let resolution = resolve_token(&token, lookup).await;
        Resolution {
            text: Cow::Owned(resolution.text.into_owned()),
            mention: resolution.mention,
        }
    }

    #[tokio::test]
    async fn test_labeled_user_skips_lookup() {
        let lookup = MockLookup::default();
        let r = resolve("<@U1|Bob>", &lookup).await;
        assert_eq!(r.text, "@Bob");
        let mention = r.mention.unwrap();
        assert_eq!(mention.id(), "U1");
        assert_eq!(mention.kind(), MentionKind::User);
        assert!(mention.resolved().is_none());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let lookup = MockLookup::default();
        let r = resolve("<@U1>", &lookup).await;
        assert_eq!(r.text, "@bob");
        let mention = r.mention.unwrap();
        assert_eq!(mention.resolved_user().map(|u| u.name.as_str()), Some("bob"));
    }

    #[tokio::test]
    async fn test_failed_user_lookup_falls_back() {
        let lookup = MockLookup::default();
        let r = resolve("<@U2>", &lookup).await;
        assert_eq!(r.text, "<@U2>");
        assert!(r.mention.is_none());
    }

    #[tokio::test]
    async fn test_conversation_lookup() {
        let lookup = MockLookup::default();

        let found = resolve("<#C1>", &lookup).await;
        assert_eq!(found.text, "#general");
        assert_eq!(found.mention.unwrap().kind(), MentionKind::Conversation);

        let failed = resolve("<#C2>", &lookup).await;
        assert_eq!(failed.text, "<#C2>");
        assert!(failed.mention.is_none());

        let missing = resolve("<#C3>", &lookup).await;
        assert_eq!(missing.text, "<#C3>");
        assert!(missing.mention.is_none());
    }

    #[tokio::test]
    async fn test_labeled_conversation() {
        let lookup = MockLookup::default();
        let r = resolve("<#C9|random>", &lookup).await;
        assert_eq!(r.text, "#random");
        let mention = r.mention.unwrap();
        assert_eq!(mention.id(), "C9");
        assert!(mention.resolved_conversation().is_none());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_special_keywords() {
        let lookup = MockLookup::default();
        for keyword in BROADCAST_KEYWORDS {
            let r = resolve(&format!("<!{keyword}>"), &lookup).await;
            assert_eq!(r.text, format!("@{keyword}"));
            assert!(r.mention.is_none());
        }

        let labeled_keyword = resolve("<!channel|everyone here>", &lookup).await;
        assert_eq!(labeled_keyword.text, "@channel");

        let labeled = resolve("<!subteam^S1|@team>", &lookup).await;
        assert_eq!(labeled.text, "@team");

        let unlabeled = resolve("<!date^1392734382^{date}>", &lookup).await;
        assert_eq!(unlabeled.text, "<!date^1392734382^{date}>");
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_links() {
        let lookup = MockLookup::default();

        assert_eq!(resolve("<http://x.io>", &lookup).await.text, "http://x.io");
        assert_eq!(
            resolve("<http://x.io|site>", &lookup).await.text,
            "site (http://x.io)"
        );
        assert_eq!(resolve("<http://x.io|x.io>", &lookup).await.text, "http://x.io");
        assert_eq!(
            resolve("<mailto:a@b.io|a@b.io>", &lookup).await.text,
            "a@b.io"
        );
        assert_eq!(
            resolve("<mailto:a@b.io|mail me>", &lookup).await.text,
            "mail me (a@b.io)"
        );
        assert!(resolve("<http://x.io|site>", &lookup).await.mention.is_none());
    }
}
