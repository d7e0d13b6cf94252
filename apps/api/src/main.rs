mod classification;
mod config;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::{ClassificationPipeline, ModelArtifacts, ResumeClassifier};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Screener API v{}", env!("CARGO_PKG_VERSION"));
    info!("Model directory: {}", config.model_dir.display());

    // Load the frozen model artifacts. All three or none: never serve without a model.
    let artifacts = ModelArtifacts::load(&config.artifact_paths())
        .context("Failed to load model artifacts")?;
    let pipeline = ClassificationPipeline::new(Arc::new(artifacts));
    info!(
        "Classifier ready: {} categories",
        pipeline.summary().categories.len()
    );

    // Build app state
    let state = AppState {
        classifier: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
