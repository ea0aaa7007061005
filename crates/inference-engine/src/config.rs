//! Model configuration

use serde::{Deserialize, Serialize};

/// Where the classifier lives and how to read its output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX artifact
    pub path: String,

    /// Class names by output index, used when the model emits class ids
    pub class_labels: Vec<String>,

    /// Label that selects the risk message
    pub positive_label: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "models/heart_disease.onnx".to_string(),
            class_labels: vec!["Absent".to_string(), "Present".to_string()],
            positive_label: "Present".to_string(),
        }
    }
}
