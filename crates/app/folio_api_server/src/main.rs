//! AryanGPT relay server binary.
//!
//! Reads the Gemini credential once, builds the generation client and the
//! prompt template, then serves the relay API until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use folio_api::config::{ApiConfig, Environment};
use folio_core::biography::Biography;
use folio_core::genai::GeminiClient;
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "folio_api_server", about = "AryanGPT relay server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3100)]
    port: u16,

    /// Deployment environment; debug details are omitted in production.
    #[arg(long, env = "FOLIO_ENV", default_value = "development")]
    environment: Environment,

    /// Biography JSON file. The bundled biography is used when unset.
    #[arg(long, env = "BIOGRAPHY_PATH")]
    biography: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folio_api=debug,folio_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        environment: args.environment,
        gemini_api_key: ApiConfig::gemini_api_key_from_env(),
    };
    config.log_credential();

    let biography = match &args.biography {
        Some(path) => {
            info!(path = %path.display(), "loading biography");
            Biography::load(path)?
        }
        None => Biography::embedded()?,
    };

    let generator = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    info!(
        model = generator.model(),
        environment = %config.environment,
        "starting folio_api_server"
    );

    let state = folio_api::AppState::new(config.clone(), generator, &biography)?;
    let app = folio_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "relay API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
