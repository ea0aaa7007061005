//! Predictor seam

use crate::InferenceError;
use feature_normalizer::FeatureVector;
use tracing::debug;

/// A trained classifier that labels one feature vector
///
/// Implementations are read-only after construction so a single instance
/// can be shared between requests.
pub trait Predictor: Send + Sync {
    /// Predict the class label for `features`
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError>;
}

/// Predictor that always answers with the same label
#[derive(Debug, Clone)]
pub struct StaticPredictor {
    label: String,
}

impl StaticPredictor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Predictor for StaticPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        debug!(
            "Static prediction {:?} ({} missing features)",
            self.label,
            features.missing_fields().len()
        );
        Ok(self.label.clone())
    }
}
