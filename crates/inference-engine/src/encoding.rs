//! Tensor Encoding
//!
//! Numbers go in as-is, categories as their position in the field's choice
//! list, and missing entries as NaN for the model's own imputer.

use crate::InferenceError;
use feature_normalizer::{FeatureValue, FeatureVector, FEATURE_COUNT};

/// Encoding of a missing feature
pub const MISSING: f32 = f32::NAN;

/// Encode a feature vector as one row of model input
pub fn encode(features: &FeatureVector) -> Result<Vec<f32>, InferenceError> {
    let mut row = Vec::with_capacity(FEATURE_COUNT);

    for (field, value) in features.iter() {
        let encoded = match value {
            FeatureValue::Integer(v) => *v as f32,
            FeatureValue::Decimal(v) => *v as f32,
            FeatureValue::Category(label) => {
                let spec = field.spec();
                let index = spec.category_index(label).ok_or_else(|| InferenceError::Encoding {
                    field: spec.name,
                    detail: format!("unknown category {:?}", label),
                })?;
                index as f32
            }
            FeatureValue::Missing => MISSING,
        };
        row.push(encoded);
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_normalizer::{normalize, RawValue, NO_DATA_AVAILABLE};

    fn cat(s: &str) -> RawValue {
        RawValue::Category(s.to_string())
    }

    #[test]
    fn test_encode_row() {
        let features = normalize([
            RawValue::Integer(45),
            cat("Female"),
            cat(NO_DATA_AVAILABLE),
            RawValue::Integer(-1),
            RawValue::Integer(200),
            cat("No"),
            cat("Left_ventricular_hypertrophy"),
            RawValue::Integer(150),
            cat("Yes"),
            RawValue::Decimal(1.5),
            cat("Flat"),
            cat("Three"),
        ]);

        let row = encode(&features).unwrap();
        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row[0], 45.0);
        assert_eq!(row[1], 1.0);
        assert!(row[2].is_nan());
        assert!(row[3].is_nan());
        assert_eq!(row[4], 200.0);
        assert_eq!(row[5], 1.0);
        assert_eq!(row[6], 2.0);
        assert_eq!(row[7], 150.0);
        assert_eq!(row[8], 0.0);
        assert!((row[9] - 1.5).abs() < f32::EPSILON);
        assert_eq!(row[10], 2.0);
        assert_eq!(row[11], 3.0);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let features = normalize([
            RawValue::Integer(45),
            cat("Other"),
            cat(NO_DATA_AVAILABLE),
            RawValue::Integer(-1),
            RawValue::Integer(-1),
            cat(NO_DATA_AVAILABLE),
            cat(NO_DATA_AVAILABLE),
            RawValue::Integer(-1),
            cat(NO_DATA_AVAILABLE),
            RawValue::Decimal(-0.1),
            cat(NO_DATA_AVAILABLE),
            cat(NO_DATA_AVAILABLE),
        ]);

        let err = encode(&features).unwrap_err();
        assert!(matches!(err, InferenceError::Encoding { field: "gender", .. }));
    }
}
