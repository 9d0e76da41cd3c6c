//! External text generation.
//!
//! [`TextGenerator`] is the seam between the relay and the third-party model.
//! [`GeminiClient`] implements it against the Gemini `generateContent` API
//! with a fixed model and no sampling parameters. There is no retry and no
//! timeout: a call either returns text or fails once.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Model used for every generation request.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Errors returned by a text generator.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),
}

/// A capability that turns one prompt string into one reply string.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;

    /// Whether a credential was configured for this generator.
    fn credential_present(&self) -> bool;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` client.
///
/// Built once at process start and shared read-only across requests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: &'static str,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, GEMINI_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests and proxies).
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: GEMINI_MODEL,
        }
    }

    /// The fixed model identifier.
    pub fn model(&self) -> &str {
        self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key_present", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenAiError::MissingCredential)?;

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model = self.model, prompt_len = prompt.len(), "calling generateContent");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(status, "generateContent returned an error status");
            return Err(GenAiError::Status { status, body });
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GenAiError::MalformedResponse(e.to_string()))?;

        extract_text(data)
    }

    fn credential_present(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(data: GenerateResponse) -> Result<String, GenAiError> {
    let content = data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| GenAiError::MalformedResponse("no candidates returned".to_string()))?;

    let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        return Err(GenAiError::MalformedResponse(
            "candidate has no text parts".to_string(),
        ));
    }

    Ok(texts.concat())
}
