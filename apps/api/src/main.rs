mod ai_client;
mod config;
mod errors;
mod models;
mod questions;
mod retry;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::GeminiClient;
use crate::config::Config;
use crate::questions::store::ConvexQuestionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize AI client
    let ai = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone())?;
    info!(
        "AI client initialized (generation: {}, embeddings: {})",
        ai_client::GENERATION_MODEL,
        ai_client::EMBEDDING_MODEL
    );

    // Initialize question store client
    let questions = ConvexQuestionStore::new(config.question_store_url.clone())?;
    info!("Question store client initialized ({})", config.question_store_url);

    info!("Resume uploads capped at {} bytes", config.max_upload_bytes);

    let state = AppState {
        ai: Arc::new(ai),
        questions: Arc::new(questions),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
