//! Heart Disease Risk Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, install_metrics, run_server, AppConfig, AppState};
use inference_engine::InferenceEngine;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Heart Risk Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    // The model is loaded exactly once; any failure here is fatal
    let engine = InferenceEngine::load(&config.model)
        .with_context(|| format!("failed to load model from {}", config.model.path))?;
    let metrics = install_metrics()?;

    let state = AppState::new(Arc::new(engine)).with_metrics(metrics);
    run_server(&config, state).await?;

    Ok(())
}
