//! HTTP routes

pub mod form;
pub mod health;
pub mod predictions;

use axum::{
    routing::{get, post},
    Router,
};
use feature_normalizer::{normalize_observation, FeatureVector, PatientObservation, Validator};
use inference_engine::{InferenceEngine, InferenceResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::telemetry;
use crate::AppState;

/// Pages and read-only endpoints
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(form::show_form))
        .route("/api/v1/health", get(health::health_handler))
        .route("/metrics", get(health::metrics_handler))
}

/// Endpoints that run the model
pub fn submission_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/predict", post(form::submit_form))
        .route("/api/v1/predict", post(predictions::predict))
}

/// A scored submission
#[derive(Debug)]
pub struct Assessment {
    pub features: FeatureVector,
    pub result: InferenceResult,
}

/// Bounds-check, normalize, and score one observation
pub fn assess(
    engine: &InferenceEngine,
    observation: PatientObservation,
) -> Result<Assessment, ApiError> {
    if let Err(errors) = Validator::new().validate(&observation).into_result() {
        warn!("Rejected submission: {} invalid field(s)", errors.len());
        telemetry::record_rejection();
        return Err(ApiError::Validation(errors));
    }

    let features = normalize_observation(observation);
    let result = engine.predict(&features)?;
    telemetry::record_prediction(&result, &features);

    info!(
        outcome = result.outcome.as_str(),
        missing = features.missing_fields().len(),
        latency_ms = result.latency_ms,
        "Prediction served"
    );

    Ok(Assessment { features, result })
}
