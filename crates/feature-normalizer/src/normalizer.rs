//! Sentinel-to-Missing Normalization
//!
//! Turns the raw form values into the fixed-order feature vector the model
//! was trained on. A raw value equal to its field's sentinel becomes
//! [`FeatureValue::Missing`]; everything else passes through untouched.
//! Imputation of missing entries belongs to the model, not to this module.

use crate::field::{Field, Sentinel, FEATURE_COUNT, FIELDS, NO_DATA_AVAILABLE};
use crate::observation::{PatientObservation, RawValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Tolerance for matching decimal sentinels
const DECIMAL_SENTINEL_TOLERANCE: f64 = 1e-9;

impl Sentinel {
    /// Whether `raw` is this sentinel
    pub fn matches(&self, raw: &RawValue) -> bool {
        match (self, raw) {
            (Sentinel::None, _) => false,
            (Sentinel::Integer(s), RawValue::Integer(v)) => s == v,
            (Sentinel::Decimal(s), RawValue::Decimal(v)) => {
                (s - v).abs() < DECIMAL_SENTINEL_TOLERANCE
            }
            (Sentinel::NoDataAvailable, RawValue::Category(v)) => v == NO_DATA_AVAILABLE,
            _ => false,
        }
    }
}

/// One normalized model input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Decimal(f64),
    Category(String),
    /// Unknown; imputed by the model
    Missing,
}

impl FeatureValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Missing)
    }
}

impl From<RawValue> for FeatureValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Integer(v) => FeatureValue::Integer(v),
            RawValue::Decimal(v) => FeatureValue::Decimal(v),
            RawValue::Category(v) => FeatureValue::Category(v),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{}", v),
            FeatureValue::Decimal(v) => write!(f, "{}", v),
            FeatureValue::Category(v) => write!(f, "{}", v),
            FeatureValue::Missing => write!(f, "missing"),
        }
    }
}

/// Feature vector for ML inference, in training column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: [FeatureValue; FEATURE_COUNT],
}

impl FeatureVector {
    /// Value at `field`'s column
    pub fn get(&self, field: Field) -> &FeatureValue {
        &self.values[field.index()]
    }

    pub fn values(&self) -> &[FeatureValue; FEATURE_COUNT] {
        &self.values
    }

    /// `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FeatureValue)> {
        Field::ALL.iter().copied().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields that were mapped to missing
    pub fn missing_fields(&self) -> Vec<Field> {
        self.iter()
            .filter(|(_, v)| v.is_missing())
            .map(|(f, _)| f)
            .collect()
    }
}

/// Map raw values to the feature vector, replacing sentinels with missing
pub fn normalize(raw_fields: [RawValue; FEATURE_COUNT]) -> FeatureVector {
    let mut i = 0;
    let values = raw_fields.map(|raw| {
        let spec = &FIELDS[i];
        i += 1;
        if spec.sentinel.matches(&raw) {
            FeatureValue::Missing
        } else {
            FeatureValue::from(raw)
        }
    });

    let vector = FeatureVector { values };
    debug!(
        "Normalized observation: {} of {} features missing",
        vector.missing_fields().len(),
        FEATURE_COUNT
    );
    vector
}

/// Normalize a whole observation
pub fn normalize_observation(observation: PatientObservation) -> FeatureVector {
    normalize(observation.into_raw_fields())
}
