//! Chat conversation state machine.
//!
//! A [`Conversation`] is an ordered, in-memory list of [`Message`]s. Each user
//! submission appends the user's message and a pending assistant placeholder;
//! the placeholder is later settled exactly once, keyed by its [`MessageId`].
//! Because settlement is keyed by id rather than position, responses that
//! complete out of order still land on the right placeholder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ASSISTANT_NAME;
use crate::ids::MessageId;

/// Greeting shown at the start of every conversation.
pub const GREETING: &str =
    "Yo! I'm AryanGPT, your chaotic-genius AI clone. Ask me anything about Aryan.";

/// Text of a placeholder while its request is in flight, and of an empty reply.
pub const PLACEHOLDER_TEXT: &str = "...";

/// Shown when the relay endpoint itself could not be reached.
pub const CLIENT_FALLBACK: &str = "⚠️ Gemini AI not responding. Try again later.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Label used in transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => ASSISTANT_NAME,
        }
    }
}

/// Lifecycle of a message. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Final,
    /// Terminal like `Final`, but the text is a fixed error string.
    Failed,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>, status: MessageStatus) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            status,
            timestamp: Some(Utc::now()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }
}

/// How a request for a placeholder settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The relay answered with this text (which may be its own fallback).
    Reply(String),
    /// The relay could not be reached or answered with something unusable.
    TransportFailed,
}

/// Ordered chat history held in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation containing only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Self::greeting()],
        }
    }

    fn greeting() -> Message {
        Message::new(Sender::Assistant, GREETING, MessageStatus::Final)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Number of placeholders still waiting for a response.
    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }

    /// Append the user's message and a pending assistant placeholder.
    ///
    /// Returns the placeholder id the caller must settle later, or `None`
    /// when `text` is blank (nothing is appended).
    pub fn submit(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages
            .push(Message::new(Sender::User, text, MessageStatus::Final));
        let placeholder = Message::new(Sender::Assistant, PLACEHOLDER_TEXT, MessageStatus::Pending);
        let id = placeholder.id;
        self.messages.push(placeholder);
        Some(id)
    }

    /// Settle the placeholder `id` with `outcome`.
    ///
    /// Returns `false` if no pending message has that id (unknown, already
    /// settled, or discarded by a reset).
    pub fn settle(&mut self, id: MessageId, outcome: Outcome) -> bool {
        let Some(msg) = self
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.is_pending())
        else {
            return false;
        };

        match outcome {
            Outcome::Reply(text) if text.is_empty() => {
                msg.text = PLACEHOLDER_TEXT.to_string();
                msg.status = MessageStatus::Final;
            }
            Outcome::Reply(text) => {
                msg.text = text;
                msg.status = MessageStatus::Final;
            }
            Outcome::TransportFailed => {
                msg.text = CLIENT_FALLBACK.to_string();
                msg.status = MessageStatus::Failed;
            }
        }
        msg.timestamp = Some(Utc::now());
        true
    }

    /// Replace the whole conversation with the greeting.
    pub fn reset(&mut self) {
        self.messages = vec![Self::greeting()];
    }

    /// Plain-text transcript: one `Sender: text` line per message, separated
    /// by a blank line.
    pub fn export_transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.sender.label(), m.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
