//! Reply formatting.
//!
//! Replies from the model use a small subset of markdown. [`format_reply`]
//! turns a reply into typed [`Span`]s that a renderer draws directly, so no
//! raw markup is ever produced or injected.
//!
//! Rules, applied per line:
//! - `**text**` (shortest match, never across lines) becomes [`Span::Bold`].
//! - A line opening with one or more `*` and then whitespace becomes a
//!   [`Span::Bullet`] followed by the rest of the line. Asterisks already
//!   consumed by a bold match do not count.
//! - Each newline becomes [`Span::Break`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*+\s+").expect("valid regex"));

/// One inline piece of a formatted reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Bold(String),
    Bullet,
    Break,
}

/// Split `text` into spans.
pub fn format_reply(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span::Break);
        }
        format_line(line, &mut spans);
    }

    spans
}

fn format_line(line: &str, spans: &mut Vec<Span>) {
    let first_bold = BOLD.find(line).map(|m| m.start()).unwrap_or(line.len());

    let mut cursor = 0;
    if let Some(m) = BULLET.find(&line[..first_bold]) {
        spans.push(Span::Bullet);
        cursor = m.end();
    }

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < cursor {
            continue;
        }
        push_text(spans, &line[cursor..whole.start()]);
        spans.push(Span::Bold(inner.as_str().to_string()));
        cursor = whole.end();
    }

    push_text(spans, &line[cursor..]);
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}
