//! Wire models for the relay API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/aryan-ai`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    pub query: String,
}

/// Debug details included outside production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub credential_present: bool,
}

/// Response of `POST /api/aryan-ai`. Always sent with `200 OK`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub credential_present: bool,
}
