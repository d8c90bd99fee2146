//! Inline span tokenizer for bold runs and links.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

// `.` does not cross newlines, so a token never spans two lines of a paragraph.
static INLINE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<bold>\*\*.*?\*\*)|(?P<link>\[(?P<label>.*?)\]\((?P<url>.*?)\))")
        .expect("inline token pattern is valid")
});

/// A styled or plain segment within a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineSpan {
    PlainText { text: String },
    Bold { text: String },
    Link { text: String, url: String },
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::Bold { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    /// The visible text of the span, without markup.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText { text } | Self::Bold { text } | Self::Link { text, .. } => text,
        }
    }
}

/// Split `text` into plain, bold and link spans.
///
/// Tokens are matched left to right with shortest-match semantics and never
/// overlap. Unterminated markup stays plain text, so the function is total.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_TOKEN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&mut spans, &text[cursor..whole.start()]);
        if let Some(span) = token_span(&caps) {
            spans.push(span);
        }
        cursor = whole.end();
    }
    push_plain(&mut spans, &text[cursor..]);

    spans
}

fn token_span(caps: &Captures<'_>) -> Option<InlineSpan> {
    let whole = caps.get(0)?.as_str();
    if whole.is_empty() {
        return None;
    }

    if let Some(bold) = caps.name("bold") {
        let inner = &bold.as_str()[2..bold.as_str().len() - 2];
        return Some(InlineSpan::bold(inner));
    }

    if caps.name("link").is_some() {
        return Some(match (caps.name("label"), caps.name("url")) {
            (Some(label), Some(url)) => InlineSpan::link(label.as_str(), url.as_str()),
            _ => InlineSpan::plain(whole),
        });
    }

    Some(InlineSpan::plain(whole))
}

fn push_plain(spans: &mut Vec<InlineSpan>, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::plain(text));
    }
}
