//! Slack inline markup scanning.
//!
//! Slack encodes references inside message text as angle-bracket tokens:
//!
//! ```text
//! <@U123>            user mention
//! <@U123|bob>        user mention with inline display name
//! <#C123|general>    channel mention
//! <!here>            special keyword
//! <https://x.y|site> link with label
//! ```
//!
//! The grammar is `<` then an optional sigil (`@`, `#`, `!`) then a reference
//! of one or more characters other than `>` and `|`, then optionally `|` and
//! a label of one or more characters other than `>`, then `>`. Everything
//! else is literal text.
//!
//! [`scan`] is a pure step function over a byte cursor; [`tokenize`] wraps it
//! in an iterator. Together the spans cover the input exactly once.

use std::ops::Range;

// ============================================================================
// Sigil
// ============================================================================

/// The one-character marker that follows `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `@` - user reference.
    User,
    /// `#` - conversation reference.
    Conversation,
    /// `!` - special keyword (`here`, `channel`, ...).
    Special,
}

impl Sigil {
    /// Parses a sigil character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::User),
            '#' => Some(Self::Conversation),
            '!' => Some(Self::Special),
            _ => None,
        }
    }

    /// Returns the sigil character.
    pub fn as_char(self) -> char {
        match self {
            Self::User => '@',
            Self::Conversation => '#',
            Self::Special => '!',
        }
    }
}

// ============================================================================
// Tokens and spans
// ============================================================================

/// A parsed `<...>` token borrowed from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupToken<'a> {
    /// `None` for a bare link token.
    pub sigil: Option<Sigil>,
    pub reference: &'a str,
    pub label: Option<&'a str>,
    /// Byte range of the whole token, brackets included.
    pub span: Range<usize>,
    /// The exact matched source text.
    pub source: &'a str,
}

/// One piece of scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    Literal(&'a str),
    Token(MarkupToken<'a>),
}

// ============================================================================
// Scanning
// ============================================================================

/// Scans one span starting at byte offset `cursor`.
///
/// Returns the span and the cursor to continue from, or `None` once the
/// input is exhausted. The returned cursor is always strictly greater than
/// `cursor`.
pub fn scan(text: &str, cursor: usize) -> Option<(Span<'_>, usize)> {
    if cursor >= text.len() {
        return None;
    }

    match find_token(text, cursor) {
        Some(token) if token.span.start == cursor => {
            let next = token.span.end;
            Some((Span::Token(token), next))
        }
        Some(token) => {
            let next = token.span.start;
            Some((Span::Literal(&text[cursor..next]), next))
        }
        None => Some((Span::Literal(&text[cursor..]), text.len())),
    }
}

/// Returns an iterator over the spans of `text`.
pub fn tokenize(text: &str) -> Scanner<'_> {
    Scanner { text, cursor: 0 }
}

/// Iterator produced by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, next) = scan(self.text, self.cursor)?;
        // Every span is non-empty, so the cursor always moves forward.
        debug_assert!(next > self.cursor);
        self.cursor = next;
        Some(span)
    }
}

/// Finds the leftmost token starting at or after `from`.
fn find_token(text: &str, from: usize) -> Option<MarkupToken<'_>> {
    for (offset, _) in text[from..].match_indices('<') {
        let start = from + offset;
        // No closing bracket anywhere ahead: nothing further can match.
        if !text[start..].contains('>') {
            return None;
        }
        if let Some(token) = match_at(text, start) {
            return Some(token);
        }
    }
    None
}

/// Tries to match a token whose `<` is at `start`.
///
/// A sigil is tried first; when the sigil form cannot match (`<@>`,
/// `<@|bob>`), the same bracket is retried as a bare link whose reference
/// begins with the sigil character.
fn match_at(text: &str, start: usize) -> Option<MarkupToken<'_>> {
    let sigil = text[start + 1..].chars().next().and_then(Sigil::from_char);
    if let Some(sigil) = sigil
        && let Some(token) = match_body(text, start, 2, Some(sigil))
    {
        return Some(token);
    }
    match_body(text, start, 1, None)
}

fn match_body(
    text: &str,
    start: usize,
    offset: usize,
    sigil: Option<Sigil>,
) -> Option<MarkupToken<'_>> {
    let reference_start = start + offset;
    let reference_len = text[reference_start..].find(['>', '|'])?;
    if reference_len == 0 {
        return None;
    }
    let reference_end = reference_start + reference_len;
    let reference = &text[reference_start..reference_end];

    let (label, end) = if text[reference_end..].starts_with('|') {
        let label_start = reference_end + 1;
        let label_len = text[label_start..].find('>')?;
        if label_len == 0 {
            return None;
        }
        let label_end = label_start + label_len;
        (Some(&text[label_start..label_end]), label_end + 1)
    } else {
        (None, reference_end + 1)
    };

    Some(MarkupToken {
        sigil,
        reference,
        label,
        span: start..end,
        source: &text[start..end],
    })
}
