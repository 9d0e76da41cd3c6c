//! # folio_core
//!
//! Core domain logic for the AryanGPT portfolio chat: the biography
//! document, prompt construction, the external generation client and the
//! client-side conversation state machine.

pub mod biography;
pub mod conversation;
pub mod format;
pub mod genai;
pub mod ids;
pub mod prompt;
pub mod suggestions;

/// Display name of the assistant persona.
pub const ASSISTANT_NAME: &str = "AryanGPT";

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
