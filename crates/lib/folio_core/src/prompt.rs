//! Prompt construction for the relay.
//!
//! A prompt is the fixed instruction header, the pretty-printed biography and
//! the user's query, concatenated verbatim.

use crate::biography::{Biography, BiographyError};

const HEADER: &str = "Ai version of aryan, an embedded systems engineer. Use the following JSON  data about aryan to answer the user's query.";

const GUIDANCE: &str = "If someone asks about Aryan's:
- skills → summarize categories.
- projects → show project names + short summaries.
- experience → list companies and what was done there.
- education → mention degree and college.
Be confident, friendly,funny, and write naturally like Aryan himself would.";

/// Prompt template with the biography serialized once up front.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    biography_json: String,
}

impl PromptTemplate {
    /// Build a template around `biography`.
    pub fn new(biography: &Biography) -> Result<Self, BiographyError> {
        Ok(Self {
            biography_json: biography.to_pretty_json()?,
        })
    }

    /// The serialized biography embedded in every prompt.
    pub fn biography_json(&self) -> &str {
        &self.biography_json
    }

    /// Render the full prompt for a single user query.
    pub fn render(&self, query: &str) -> String {
        format!(
            "\n{HEADER}\nData:\n{}\n\nUser: {query}\n\n{GUIDANCE}\n",
            self.biography_json
        )
    }
}
