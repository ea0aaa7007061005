//! Logging and metrics setup

use feature_normalizer::FeatureVector;
use inference_engine::InferenceResult;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ApiError;

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ApiError::Config(format!("failed to set tracing subscriber: {}", e)))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, ApiError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Config(format!("failed to install metrics recorder: {}", e)))
}

pub fn record_prediction(result: &InferenceResult, features: &FeatureVector) {
    metrics::counter!("heart_risk_predictions_total", "outcome" => result.outcome.as_str())
        .increment(1);
    metrics::histogram!("heart_risk_inference_latency_ms").record(result.latency_ms as f64);

    for field in features.missing_fields() {
        metrics::counter!("heart_risk_missing_features_total", "field" => field.as_str())
            .increment(1);
    }
}

pub fn record_rejection() {
    metrics::counter!("heart_risk_rejected_submissions_total").increment(1);
}
