//! # folio_api
//!
//! HTTP relay API for the AryanGPT portfolio chat.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use folio_core::biography::{Biography, BiographyError};
use folio_core::genai::TextGenerator;
use folio_core::prompt::PromptTemplate;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{health, relay};

/// Shared application state passed to all handlers.
///
/// Everything in here is created once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Client for the external generation capability.
    pub generator: Arc<dyn TextGenerator>,
    /// Prompt template with the biography already serialized.
    pub prompt: Arc<PromptTemplate>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(
        config: ApiConfig,
        generator: Arc<dyn TextGenerator>,
        biography: &Biography,
    ) -> Result<Self, BiographyError> {
        Ok(Self {
            config,
            generator,
            prompt: Arc::new(PromptTemplate::new(biography)?),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_ARYAN_AI, post(relay::relay_handler))
        .layer(cors)
        .with_state(state)
}
