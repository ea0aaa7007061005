//! Validation Error Types

use thiserror::Error;

/// Errors raised by the input-surface bounds checks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Decimal not on the control's step grid
    #[error("{field} value {value} is not a multiple of {step}")]
    OffStep {
        field: &'static str,
        value: f64,
        step: f64,
    },

    /// Category label not offered by the control
    #[error("{field} value {value:?} is not one of the allowed choices")]
    UnknownCategory { field: &'static str, value: String },

    /// Value of the wrong kind for the field
    #[error("Invalid data format for {field}: {detail}")]
    InvalidFormat { field: &'static str, detail: String },
}

impl ValidationError {
    /// Wire name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::OffStep { field, .. }
            | ValidationError::UnknownCategory { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}
