use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use caption_studio::{
    config::AppConfig,
    gemini::GeminiClient,
    parser::{BiasScanner, ResponseParser},
    routes::{router, AppState},
    service::CaptionService,
    store::CaptionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    let key_prefix: String = config.gemini.api_key.chars().take(4).collect();
    tracing::info!("Using API key: {}...", key_prefix);

    let gemini = GeminiClient::new(&config.gemini).context("building Gemini client")?;
    if gemini.is_demo() {
        tracing::warn!("GEMINI_API_KEY not set, running in demo mode");
    }
    let parser = ResponseParser::new(BiasScanner::new(config.bias_terms.clone()));
    tracing::info!("Bias denylist: {}", parser.scanner().terms().join(", "));
    let state = AppState {
        store: Arc::new(CaptionStore::default()),
        service: Arc::new(CaptionService::new(Arc::new(gemini), parser)),
        max_image_bytes: config.max_image_bytes,
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
