//! Terminal rendering of chat messages.

use colored::Colorize;
use folio_core::conversation::{Message, MessageStatus, Sender};
use folio_core::format::{Span, format_reply};
use folio_core::suggestions::SUGGESTIONS;

/// Draw spans: bold as bold amber, bullets as `•`, breaks as newlines.
pub fn render_spans(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(text),
            Span::Bold(text) => out.push_str(&text.yellow().bold().to_string()),
            Span::Bullet => out.push_str("• "),
            Span::Break => out.push('\n'),
        }
    }
    out
}

/// One message as it appears in the chat.
pub fn render_message(msg: &Message) -> String {
    match (msg.sender, msg.status) {
        (Sender::User, _) => format!("{} {}", label(msg.sender), msg.text),
        (Sender::Assistant, MessageStatus::Pending) => {
            format!("{}", "AryanGPT is thinking...".dimmed().italic())
        }
        (Sender::Assistant, MessageStatus::Failed) => {
            format!("{} {}", label(msg.sender), msg.text.red())
        }
        (Sender::Assistant, MessageStatus::Final) => {
            format!(
                "{} {}",
                label(msg.sender),
                render_spans(&format_reply(&msg.text))
            )
        }
    }
}

fn label(sender: Sender) -> String {
    let label = format!("{}:", sender.label());
    match sender {
        Sender::User => label.cyan().bold().to_string(),
        Sender::Assistant => label.magenta().bold().to_string(),
    }
}

/// Numbered list of the suggested questions.
pub fn render_suggestions() -> String {
    SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  /{} {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub const HELP: &str = "Commands: /reset, /export [path], /suggest, /<n> to send suggestion n, /help, /quit";
