//! Raw Patient Observation

use crate::field::{Field, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw value as collected from an input control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Decimal(f64),
    Category(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(v) => write!(f, "{}", v),
            RawValue::Decimal(v) => write!(f, "{}", v),
            RawValue::Category(v) => write!(f, "{}", v),
        }
    }
}

/// One form submission, before sentinel mapping
///
/// Field names double as form and JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    pub age: i64,
    pub gender: String,
    pub chest_pain_type: String,
    pub resting_bp: i64,
    pub serum_cholesterol: i64,
    pub fasting_blood_sugar_high: String,
    pub resting_ecg: String,
    pub max_heart_rate: i64,
    pub exercise_angina: String,
    pub st_depression: f64,
    pub st_slope: String,
    pub major_vessels_count: String,
}

impl PatientObservation {
    /// Raw values in column order
    pub fn into_raw_fields(self) -> [RawValue; FEATURE_COUNT] {
        [
            RawValue::Integer(self.age),
            RawValue::Category(self.gender),
            RawValue::Category(self.chest_pain_type),
            RawValue::Integer(self.resting_bp),
            RawValue::Integer(self.serum_cholesterol),
            RawValue::Category(self.fasting_blood_sugar_high),
            RawValue::Category(self.resting_ecg),
            RawValue::Integer(self.max_heart_rate),
            RawValue::Category(self.exercise_angina),
            RawValue::Decimal(self.st_depression),
            RawValue::Category(self.st_slope),
            RawValue::Category(self.major_vessels_count),
        ]
    }

    /// Raw value of a single field
    pub fn raw(&self, field: Field) -> RawValue {
        match field {
            Field::Age => RawValue::Integer(self.age),
            Field::Gender => RawValue::Category(self.gender.clone()),
            Field::ChestPainType => RawValue::Category(self.chest_pain_type.clone()),
            Field::RestingBp => RawValue::Integer(self.resting_bp),
            Field::SerumCholesterol => RawValue::Integer(self.serum_cholesterol),
            Field::FastingBloodSugarHigh => {
                RawValue::Category(self.fasting_blood_sugar_high.clone())
            }
            Field::RestingEcg => RawValue::Category(self.resting_ecg.clone()),
            Field::MaxHeartRate => RawValue::Integer(self.max_heart_rate),
            Field::ExerciseAngina => RawValue::Category(self.exercise_angina.clone()),
            Field::StDepression => RawValue::Decimal(self.st_depression),
            Field::StSlope => RawValue::Category(self.st_slope.clone()),
            Field::MajorVesselsCount => RawValue::Category(self.major_vessels_count.clone()),
        }
    }
}
