//! Patient Feature Normalization
//!
//! Maps raw patient form values to the fixed-order feature vector consumed by
//! the heart-disease classifier, replacing sentinel values with an explicit
//! missing marker. Also provides the input-surface bounds checks.

mod error;
mod field;
mod normalizer;
mod observation;
mod validator;

pub use error::ValidationError;
pub use field::{Field, FieldKind, FieldSpec, Sentinel, FEATURE_COUNT, FIELDS, NO_DATA_AVAILABLE};
pub use normalizer::{normalize, normalize_observation, FeatureValue, FeatureVector};
pub use observation::{PatientObservation, RawValue};
pub use validator::{ValidationResult, Validator};
