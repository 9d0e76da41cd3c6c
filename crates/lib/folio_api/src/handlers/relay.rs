//! Relay handler. Forwards a visitor's question to the generation API.
//!
//! `POST /api/aryan-ai`:
//! 1. Parses `{query}` from the body
//! 2. Renders the prompt (instructions + biography + query)
//! 3. Calls the external generator once
//! 4. Returns the reply text verbatim
//!
//! Every failure is absorbed here and answered with `200 OK` and the fixed
//! fallback reply. Outside production the body also carries the error
//! message and whether a credential is configured.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{debug, error};

use crate::AppState;
use crate::error::{RelayError, RelayResult, SERVER_FALLBACK};
use crate::models::{DebugInfo, RelayRequest, RelayResponse};

/// `POST /api/aryan-ai`: answer a question about the portfolio subject.
pub async fn relay_handler(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Json<RelayResponse> {
    let debug_info = (!state.config.environment.is_production()).then(|| DebugInfo {
        credential_present: state.generator.credential_present(),
    });

    match relay(&state, payload).await {
        Ok(reply) => Json(RelayResponse {
            reply,
            error: None,
            debug: debug_info,
        }),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "AI relay failed");
            Json(RelayResponse {
                reply: SERVER_FALLBACK.to_string(),
                error: debug_info.map(|_| e.to_string()),
                debug: debug_info,
            })
        }
    }
}

async fn relay(
    state: &AppState,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> RelayResult<String> {
    let Json(request) = payload.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;

    let prompt = state.prompt.render(&request.query);
    debug!(
        query_len = request.query.len(),
        prompt_len = prompt.len(),
        "forwarding query to generator"
    );

    let reply = state.generator.generate(&prompt).await?;
    debug!(reply_len = reply.len(), "generator replied");
    Ok(reply)
}
