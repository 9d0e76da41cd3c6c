//! # folio_api_client
//!
//! Typed HTTP client for the AryanGPT relay API.
//!
//! The relay always answers `200 OK`, carrying its own fallback text when the
//! generation API fails. A [`ClientError`] therefore means the relay itself
//! could not be reached or answered with something that is not a relay body.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Path of the relay endpoint.
pub const RELAY_PATH: &str = "/api/aryan-ai";

/// Default relay base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3100";

/// Errors talking to the relay.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Relay returned {0}")]
    Status(u16),
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    query: &'a str,
}

/// Debug details the relay adds outside production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayDebug {
    pub credential_present: bool,
}

/// Body returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayReply {
    /// Reply text. A missing or `null` reply reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reply: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub debug: Option<RelayDebug>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client for the relay endpoint. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one query and return the relay's reply body.
    pub async fn ask(&self, query: &str) -> Result<RelayReply, ClientError> {
        let resp = self
            .client
            .post(format!("{}{RELAY_PATH}", self.base_url))
            .json(&RelayRequest { query })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }
}
