//! Relay error types.
//!
//! Relay failures never become HTTP error statuses. Every [`RelayError`] is
//! converted into a `200 OK` body carrying [`SERVER_FALLBACK`]; outside
//! production the body also carries the error message.

use folio_core::genai::GenAiError;
use thiserror::Error;

/// Reply text sent whenever the relay fails.
pub const SERVER_FALLBACK: &str = "⚠️ Gemini API error — check model name or key.";

/// Convenience alias for relay results.
pub type RelayResult<T> = Result<T, RelayError>;

/// Everything that can go wrong between receiving a query and returning text.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Generation(#[from] GenAiError),
}

impl RelayError {
    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::Generation(GenAiError::MissingCredential) => "missing_credential",
            RelayError::Generation(GenAiError::Request(_)) => "upstream_unreachable",
            RelayError::Generation(GenAiError::Status { .. }) => "upstream_status",
            RelayError::Generation(GenAiError::MalformedResponse(_)) => "upstream_malformed",
        }
    }
}
