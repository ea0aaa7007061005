//! ONNX predictor backed by tract

use crate::encoding::encode;
use crate::predictor::Predictor;
use crate::InferenceError;
use feature_normalizer::{FeatureVector, FEATURE_COUNT};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Classifier loaded from an ONNX file
///
/// Input is a single `f32[1, 12]` row. Output 0 is read as the class label:
/// string tensors verbatim, `i64` class ids through `class_labels`, and `f32`
/// per-class scores by argmax.
pub struct OnnxPredictor {
    plan: OnnxPlan,
    class_labels: Vec<String>,
}

impl OnnxPredictor {
    /// Load and optimize the model at `path`
    pub fn load(path: impl AsRef<Path>, class_labels: Vec<String>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("Model loaded successfully");
        Ok(Self { plan, class_labels })
    }
}

/// Read a class label from the model's first output
///
/// `f32` outputs must carry exactly one score per configured label.
pub fn decode_label(output: &Tensor, class_labels: &[String]) -> Result<String, InferenceError> {
    let unexpected = |e: TractError| InferenceError::UnexpectedOutput(e.to_string());

    match output.datum_type() {
        DatumType::String => output
            .to_array_view::<String>()
            .map_err(unexpected)?
            .iter()
            .next()
            .cloned()
            .ok_or_else(|| InferenceError::UnexpectedOutput("empty label tensor".into())),
        DatumType::I64 => {
            let id = output
                .to_array_view::<i64>()
                .map_err(unexpected)?
                .iter()
                .next()
                .copied()
                .ok_or_else(|| InferenceError::UnexpectedOutput("empty label tensor".into()))?;
            label_for(id, class_labels)
        }
        DatumType::F32 => {
            let view = output.to_array_view::<f32>().map_err(unexpected)?;
            if view.len() < 2 || view.len() != class_labels.len() {
                return Err(InferenceError::UnexpectedOutput(format!(
                    "{} score(s) for {} configured labels",
                    view.len(),
                    class_labels.len()
                )));
            }
            let (id, _) = view
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
                .ok_or_else(|| InferenceError::UnexpectedOutput("empty score tensor".into()))?;
            label_for(id as i64, class_labels)
        }
        other => Err(InferenceError::UnexpectedOutput(format!(
            "unsupported output type {:?}",
            other
        ))),
    }
}

fn label_for(id: i64, class_labels: &[String]) -> Result<String, InferenceError> {
    usize::try_from(id)
        .ok()
        .and_then(|i| class_labels.get(i))
        .cloned()
        .ok_or_else(|| {
            InferenceError::UnexpectedOutput(format!(
                "class id {} outside of {} configured labels",
                id,
                class_labels.len()
            ))
        })
}

impl Predictor for OnnxPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let row = encode(features)?;
        let actual = row.len();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), row)
            .map_err(|_| InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", FEATURE_COUNT),
                actual: format!("[{}]", actual),
            })?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let label = outputs
            .first()
            .ok_or_else(|| InferenceError::UnexpectedOutput("model produced no outputs".into()))?;

        let label = decode_label(label, &self.class_labels)?;
        debug!("Model label: {}", label);
        Ok(label)
    }
}
