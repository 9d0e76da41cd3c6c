//! API server configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown environment: {0} (expected development or production)")]
    UnknownEnvironment(String),
}

/// Deployment environment. Debug details are only exposed outside production.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Configuration for the API server.
///
/// Built once at process start and read-only afterwards.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Deployment environment.
    pub environment: Environment,
    /// Gemini API key. Never logged; only its presence and length are.
    pub gemini_api_key: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default          |
    /// |------------------|------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3100` |
    /// | `FOLIO_ENV`      | `development`    |
    /// | `GEMINI_API_KEY` | unset            |
    ///
    /// An unrecognised `FOLIO_ENV` is an error rather than a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match var("FOLIO_ENV") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };
        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3100".into()),
            environment,
            gemini_api_key: var("GEMINI_API_KEY").filter(|k| !k.is_empty()),
        })
    }

    /// `GEMINI_API_KEY` from the environment, ignoring an empty value.
    pub fn gemini_api_key_from_env() -> Option<String> {
        std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty())
    }

    /// Log whether the credential is configured. The key itself is never
    /// logged, only its presence and length.
    pub fn log_credential(&self) {
        match &self.gemini_api_key {
            Some(key) => debug!(present = true, length = key.len(), "GEMINI_API_KEY loaded"),
            None => warn!("GEMINI_API_KEY is not set. AI requests will likely fail."),
        }
    }

    pub fn credential_present(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("environment", &self.environment)
            .field("gemini_api_key_present", &self.credential_present())
            .finish()
    }
}
