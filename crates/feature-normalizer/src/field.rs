//! Field Table
//!
//! The 12 model inputs in training column order, with their domains and
//! the sentinel that stands for "unknown" on each one.

use serde::{Deserialize, Serialize};

/// Number of features the model was trained on
pub const FEATURE_COUNT: usize = 12;

/// Category label reserved to mean "unknown"
pub const NO_DATA_AVAILABLE: &str = "No Data Available";

/// Model input, in training column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    ChestPainType,
    RestingBp,
    SerumCholesterol,
    FastingBloodSugarHigh,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    StSlope,
    MajorVesselsCount,
}

impl Field {
    /// All fields in column order
    pub const ALL: [Field; FEATURE_COUNT] = [
        Field::Age,
        Field::Gender,
        Field::ChestPainType,
        Field::RestingBp,
        Field::SerumCholesterol,
        Field::FastingBloodSugarHigh,
        Field::RestingEcg,
        Field::MaxHeartRate,
        Field::ExerciseAngina,
        Field::StDepression,
        Field::StSlope,
        Field::MajorVesselsCount,
    ];

    /// Column position in the feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Table entry for this field
    pub fn spec(&self) -> &'static FieldSpec {
        &FIELDS[self.index()]
    }

    /// Wire name (form and JSON key)
    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }
}

/// Value domain of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole number in `[min, max]`
    Integer { min: i64, max: i64 },
    /// Decimal in `[min, max]` on a grid of `step`
    Decimal { min: f64, max: f64, step: f64 },
    /// One of a fixed list of labels
    Category { choices: &'static [&'static str] },
}

/// Raw value standing for "unknown"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sentinel {
    /// Field is always required
    None,
    Integer(i64),
    Decimal(f64),
    /// The `"No Data Available"` choice
    NoDataAvailable,
}

/// One row of the field table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    /// Wire name
    pub name: &'static str,
    /// Display label on the form
    pub label: &'static str,
    /// Help text shown next to the control
    pub help: &'static str,
    pub kind: FieldKind,
    pub sentinel: Sentinel,
}

impl FieldSpec {
    /// Category choices, or an empty slice for numeric fields
    pub fn choices(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Category { choices } => choices,
            _ => &[],
        }
    }

    /// Position of `label` within the field's choices
    pub fn category_index(&self, label: &str) -> Option<usize> {
        self.choices().iter().position(|c| *c == label)
    }
}

const YES_NO: &[&str] = &["Yes", "No"];

/// Declarative sentinel table, indexed by [`Field::index`]
pub static FIELDS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec {
        field: Field::Age,
        name: "age",
        label: "Age",
        help: "Enter the age of the patient (in years).",
        kind: FieldKind::Integer { min: 0, max: 120 },
        sentinel: Sentinel::None,
    },
    FieldSpec {
        field: Field::Gender,
        name: "gender",
        label: "Gender",
        help: "Select the patient's gender.",
        kind: FieldKind::Category {
            choices: &["Male", "Female"],
        },
        sentinel: Sentinel::None,
    },
    FieldSpec {
        field: Field::ChestPainType,
        name: "chest_pain_type",
        label: "Chest Pain Type",
        help: "Select the type of chest pain. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category {
            choices: &[
                "Non-anginal_pain",
                "Typical_angina",
                "Atypical_angina",
                "Asymptomatic",
            ],
        },
        sentinel: Sentinel::NoDataAvailable,
    },
    FieldSpec {
        field: Field::RestingBp,
        name: "resting_bp",
        label: "Resting Blood Pressure",
        help: "Enter the resting blood pressure (in mmHg). '-1' corresponds to an unknown value; the mean is used for prediction.",
        kind: FieldKind::Integer { min: -1, max: 300 },
        sentinel: Sentinel::Integer(-1),
    },
    FieldSpec {
        field: Field::SerumCholesterol,
        name: "serum_cholesterol",
        label: "Serum Cholesterol",
        help: "Enter serum cholesterol level (in mg/dL). '-1' corresponds to an unknown value; the mean is used for prediction.",
        kind: FieldKind::Integer { min: -1, max: 1000 },
        sentinel: Sentinel::Integer(-1),
    },
    FieldSpec {
        field: Field::FastingBloodSugarHigh,
        name: "fasting_blood_sugar_high",
        label: "Fasting Blood Sugar > 120 mg/dL",
        help: "Indicate if fasting blood sugar is greater than 120 mg/dL. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category { choices: YES_NO },
        sentinel: Sentinel::NoDataAvailable,
    },
    FieldSpec {
        field: Field::RestingEcg,
        name: "resting_ecg",
        label: "Resting Electrocardiographic Results",
        help: "Select the resting electrocardiographic result. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category {
            choices: &[
                "ST-T_wave_abnormality",
                "Normal",
                "Left_ventricular_hypertrophy",
            ],
        },
        sentinel: Sentinel::NoDataAvailable,
    },
    FieldSpec {
        field: Field::MaxHeartRate,
        name: "max_heart_rate",
        label: "Maximum Heart Rate Achieved",
        help: "Enter the maximum heart rate achieved. '-1' corresponds to an unknown value; the mean is used for prediction.",
        kind: FieldKind::Integer { min: -1, max: 250 },
        sentinel: Sentinel::Integer(-1),
    },
    FieldSpec {
        field: Field::ExerciseAngina,
        name: "exercise_angina",
        label: "Exercise-Induced Angina",
        help: "Indicate if exercise induced angina is present. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category { choices: YES_NO },
        sentinel: Sentinel::NoDataAvailable,
    },
    FieldSpec {
        field: Field::StDepression,
        name: "st_depression",
        label: "ST Depression Induced by Exercise",
        help: "Enter ST depression induced by exercise relative to rest. '-0.1' corresponds to an unknown value; the mean is used for prediction.",
        kind: FieldKind::Decimal {
            min: -0.1,
            max: 10.0,
            step: 0.1,
        },
        sentinel: Sentinel::Decimal(-0.1),
    },
    FieldSpec {
        field: Field::StSlope,
        name: "st_slope",
        label: "Slope of Peak Exercise ST Segment",
        help: "A normal ST segment during exercise slopes sharply upwards. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category {
            choices: &["Downsloping", "Upsloping", "Flat"],
        },
        sentinel: Sentinel::NoDataAvailable,
    },
    FieldSpec {
        field: Field::MajorVesselsCount,
        name: "major_vessels_count",
        label: "Number of Major Vessels",
        help: "Number of major vessels colored by fluoroscopy. 'No Data Available' corresponds to an unknown value; the most frequent category is used for prediction.",
        kind: FieldKind::Category {
            choices: &["Zero", "One", "Two", "Three"],
        },
        sentinel: Sentinel::NoDataAvailable,
    },
];
