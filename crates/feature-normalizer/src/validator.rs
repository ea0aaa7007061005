//! Input Surface Bounds Checking
//!
//! Enforces the domains the form controls offer (numeric min/max, the
//! decimal step grid, the listed choices). Sentinels are in-domain values
//! and always pass.

use crate::error::ValidationError;
use crate::field::{FieldKind, FieldSpec, Sentinel, FIELDS, NO_DATA_AVAILABLE};
use crate::observation::{PatientObservation, RawValue};
use tracing::debug;

/// Slack allowed when checking a decimal against its step grid
const STEP_TOLERANCE: f64 = 1e-6;

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// Turn into a `Result`, keeping every error
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Bounds checker for patient observations
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check every field of an observation
    pub fn validate(&self, observation: &PatientObservation) -> ValidationResult {
        let errors: Vec<ValidationError> = FIELDS
            .iter()
            .filter_map(|spec| {
                self.validate_field(spec, &observation.raw(spec.field))
                    .err()
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::valid(FIELDS.len())
        } else {
            debug!("Observation rejected with {} errors", errors.len());
            ValidationResult::invalid(errors, FIELDS.len())
        }
    }

    /// Check one raw value against its field's domain
    pub fn validate_field(&self, spec: &FieldSpec, raw: &RawValue) -> Result<(), ValidationError> {
        match (spec.kind, raw) {
            (FieldKind::Integer { min, max }, RawValue::Integer(v)) => {
                self.validate_range(spec.name, *v as f64, (min as f64, max as f64))
            }
            (FieldKind::Decimal { min, max, step }, RawValue::Decimal(v)) => {
                if !v.is_finite() {
                    return Err(ValidationError::InvalidFormat {
                        field: spec.name,
                        detail: format!("{} is not a finite number", v),
                    });
                }
                self.validate_range(spec.name, *v, (min, max))?;
                self.validate_step(spec.name, *v, min, step)
            }
            (FieldKind::Category { choices }, RawValue::Category(v)) => {
                let sentinel_ok =
                    spec.sentinel == Sentinel::NoDataAvailable && v == NO_DATA_AVAILABLE;
                if sentinel_ok || choices.contains(&v.as_str()) {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownCategory {
                        field: spec.name,
                        value: v.clone(),
                    })
                }
            }
            (kind, other) => Err(ValidationError::InvalidFormat {
                field: spec.name,
                detail: format!("{:?} does not fit {:?}", other, kind),
            }),
        }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    fn validate_step(
        &self,
        field: &'static str,
        value: f64,
        base: f64,
        step: f64,
    ) -> Result<(), ValidationError> {
        let steps = (value - base) / step;
        if (steps - steps.round()).abs() > STEP_TOLERANCE {
            Err(ValidationError::OffStep { field, value, step })
        } else {
            Ok(())
        }
    }
}
