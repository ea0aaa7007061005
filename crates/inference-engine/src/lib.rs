//! Heart Disease Inference Engine
//!
//! Wraps the pre-trained classifier behind the [`Predictor`] seam. The ONNX
//! artifact is loaded once with tract-onnx into a read-only
//! [`InferenceEngine`] handle that is shared by reference afterwards.

mod config;
mod encoding;
mod engine;
mod onnx;
mod predictor;

pub use config::ModelConfig;
pub use encoding::{encode, MISSING};
pub use engine::{InferenceEngine, InferenceResult, RiskOutcome};
pub use onnx::{decode_label, OnnxPredictor};
pub use predictor::{Predictor, StaticPredictor};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Cannot encode {field}: {detail}")]
    Encoding { field: &'static str, detail: String },
    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),
}
