//! Inference Engine Implementation

use crate::config::ModelConfig;
use crate::onnx::OnnxPredictor;
use crate::predictor::{Predictor, StaticPredictor};
use crate::InferenceError;
use feature_normalizer::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Risk branch selected from the model label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskOutcome {
    /// Model answered with the positive label
    Present,
    /// Any other label
    NotPresent,
}

impl RiskOutcome {
    /// Select the branch for `label`
    pub fn from_label(label: &str, positive_label: &str) -> Self {
        if label == positive_label {
            RiskOutcome::Present
        } else {
            RiskOutcome::NotPresent
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskOutcome::Present => "present",
            RiskOutcome::NotPresent => "not_present",
        }
    }

    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            RiskOutcome::Present => {
                "The patient is likely to have heart disease. Please consult a doctor for further evaluation."
            }
            RiskOutcome::NotPresent => {
                "The patient is unlikely to have heart disease. However, maintaining regular check-ups is recommended."
            }
        }
    }
}

/// Result of inference operation
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    /// Raw label returned by the model
    pub label: String,
    /// Branch selected from the label
    pub outcome: RiskOutcome,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Read-only handle to the loaded classifier
///
/// Built once at startup and shared behind an `Arc`; nothing in it changes
/// afterwards.
pub struct InferenceEngine {
    predictor: Box<dyn Predictor>,
    model_path: String,
    positive_label: String,
}

impl InferenceEngine {
    /// Load the ONNX model named by `config`
    pub fn load(config: &ModelConfig) -> Result<Self, InferenceError> {
        info!("Creating inference engine with model: {}", config.path);
        let predictor = OnnxPredictor::load(&config.path, config.class_labels.clone())?;
        Ok(Self {
            predictor: Box::new(predictor),
            model_path: config.path.clone(),
            positive_label: config.positive_label.clone(),
        })
    }

    /// Wrap an already constructed predictor
    pub fn with_predictor(
        predictor: impl Predictor + 'static,
        model_path: impl Into<String>,
        positive_label: impl Into<String>,
    ) -> Self {
        Self {
            predictor: Box::new(predictor),
            model_path: model_path.into(),
            positive_label: positive_label.into(),
        }
    }

    /// Create a mock inference engine that always answers `label`
    pub fn mock(label: &str) -> Self {
        info!("Creating mock inference engine answering {:?}", label);
        Self::with_predictor(
            StaticPredictor::new(label),
            "mock",
            ModelConfig::default().positive_label,
        )
    }

    /// Run inference on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        let label = self.predictor.predict(features)?;
        let outcome = RiskOutcome::from_label(&label, &self.positive_label);

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Inference completed in {}ms: {} -> {:?}", latency_ms, label, outcome);

        Ok(InferenceResult {
            label,
            outcome,
            latency_ms,
        })
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// Label that selects the risk branch
    pub fn positive_label(&self) -> &str {
        &self.positive_label
    }
}
