//! Prediction Routes

use axum::{extract::State, Json};
use feature_normalizer::{FeatureVector, Field, PatientObservation};
use inference_engine::RiskOutcome;
use serde::Serialize;
use std::sync::Arc;

use super::assess;
use crate::error::ApiError;
use crate::AppState;

/// Response for the prediction endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Label returned by the model
    pub label: String,
    pub outcome: RiskOutcome,
    pub message: &'static str,
    /// Fields sent to the model as missing
    pub missing_fields: Vec<Field>,
    /// Normalized vector in column order, `null` for missing entries
    pub features: FeatureVector,
    pub latency_ms: u64,
}

/// Score a JSON observation
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(observation): Json<PatientObservation>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let assessment = assess(&state.engine, observation)?;
    let result = assessment.result;

    Ok(Json(PredictionResponse {
        missing_fields: assessment.features.missing_fields(),
        features: assessment.features,
        message: result.outcome.message(),
        outcome: result.outcome,
        label: result.label,
        latency_ms: result.latency_ms,
    }))
}
