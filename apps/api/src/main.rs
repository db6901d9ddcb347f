mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod profile;
mod resume;
mod review;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autofill API v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&config.upload_dir).with_context(|| {
        format!(
            "Upload directory '{}' is not usable",
            config.upload_dir.display()
        )
    })?;
    info!("Uploads stored under {}", config.upload_dir.display());

    // Initialize LLM client
    let llm: Arc<dyn TextGenerator> = Arc::new(
        GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            config.llm_timeout,
        )
        .context("Failed to build HTTP client for the language model")?,
    );
    info!("LLM client initialized (model: {})", llm.model());

    info!(
        "OCR: {} + {} ({} dpi, lang {}, {}s per page)",
        config.ocr.pdftoppm_bin,
        config.ocr.tesseract_bin,
        config.ocr.dpi,
        config.ocr.language,
        config.ocr.page_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the review page may be served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
