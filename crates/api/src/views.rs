//! HTML pages for the patient form and the prediction result

use feature_normalizer::{
    Field, FieldKind, FieldSpec, PatientObservation, Sentinel, ValidationError, FIELDS,
    NO_DATA_AVAILABLE,
};
use inference_engine::{InferenceResult, RiskOutcome};
use std::fmt::Write;

const TITLE: &str = "Heart Disease Prediction App";

const STYLE: &str = "body{font-family:Arial,sans-serif;background:#f0f2f6;margin:2em auto;max-width:56em}\
h1{color:#d63384;text-align:center}\
.field{margin:0 0 1em}.help{color:#666;font-size:.85em}\
.error{color:#a02364}.info{background:#dbeafe;padding:1em}.success{background:#dcfce7;padding:1em}\
button{background:#d63384;color:#fff;border:0;border-radius:10px;padding:.5em 1.5em}";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{style}</style></head><body><h1>{title}</h1>{body}</body></html>",
        title = TITLE,
        style = STYLE,
        body = body
    )
}

/// Options in display order; the sentinel comes first in drop-downs and last
/// in radio groups
fn options(spec: &FieldSpec) -> Vec<&'static str> {
    let mut options = spec.choices().to_vec();
    if spec.sentinel == Sentinel::NoDataAvailable {
        if is_radio(spec) {
            options.push(NO_DATA_AVAILABLE);
        } else {
            options.insert(0, NO_DATA_AVAILABLE);
        }
    }
    options
}

/// Two-way choices render as radio buttons
fn is_radio(spec: &FieldSpec) -> bool {
    spec.choices().len() == 2
}

/// Control value before the user touches it: the minimum for numbers, the
/// first option for choices
fn default_value(spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Integer { min, .. } => min.to_string(),
        FieldKind::Decimal { min, .. } => format!("{:.1}", min),
        FieldKind::Category { .. } => options(spec)
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default(),
    }
}

fn current_value(spec: &FieldSpec, observation: Option<&PatientObservation>) -> String {
    match observation.map(|obs| obs.raw(spec.field)) {
        Some(raw) => raw.to_string(),
        None => default_value(spec),
    }
}

fn render_control(out: &mut String, spec: &FieldSpec, value: &str) {
    let name = spec.name;
    match spec.kind {
        FieldKind::Integer { min, max } => {
            let _ = write!(
                out,
                "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required>",
                name = name,
                min = min,
                max = max,
                value = escape(value)
            );
        }
        FieldKind::Decimal { min, max, step } => {
            let _ = write!(
                out,
                "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required>",
                name = name,
                min = min,
                max = max,
                step = step,
                value = escape(value)
            );
        }
        FieldKind::Category { .. } if is_radio(spec) => {
            for option in options(spec) {
                let checked = if option == value { " checked" } else { "" };
                let _ = write!(
                    out,
                    "<label><input type=\"radio\" name=\"{name}\" value=\"{option}\"{checked}> {option}</label> ",
                    name = name,
                    option = escape(option),
                    checked = checked
                );
            }
        }
        FieldKind::Category { .. } => {
            let _ = write!(out, "<select id=\"{name}\" name=\"{name}\">", name = name);
            for option in options(spec) {
                let selected = if option == value { " selected" } else { "" };
                let _ = write!(
                    out,
                    "<option value=\"{option}\"{selected}>{option}</option>",
                    option = escape(option),
                    selected = selected
                );
            }
            out.push_str("</select>");
        }
    }
}

/// The patient form, optionally pre-filled with a rejected submission
pub fn form_page(observation: Option<&PatientObservation>, errors: &[ValidationError]) -> String {
    render_form(observation, errors, None)
}

/// The blank form, for a submission that could not be decoded at all
pub fn rejected_form_page(reason: &str) -> String {
    render_form(None, &[], Some(reason))
}

fn render_form(
    observation: Option<&PatientObservation>,
    errors: &[ValidationError],
    notice: Option<&str>,
) -> String {
    let mut body = String::from("<form method=\"post\" action=\"/predict\"><h2>Enter Patient Information</h2>");

    if let Some(notice) = notice {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape(notice));
    }

    if !errors.is_empty() {
        body.push_str("<ul class=\"error\">");
        for error in errors {
            let _ = write!(body, "<li>{}</li>", escape(&error.to_string()));
        }
        body.push_str("</ul>");
    }

    for spec in &FIELDS {
        let value = current_value(spec, observation);
        let _ = write!(
            body,
            "<div class=\"field\"><label for=\"{name}\"><strong>{label}</strong></label><br>",
            name = spec.name,
            label = escape(spec.label)
        );
        render_control(&mut body, spec, &value);
        if errors.iter().any(|e| e.field() == spec.name) {
            body.push_str(" <span class=\"error\">invalid</span>");
        }
        let _ = write!(body, "<div class=\"help\">{}</div></div>", escape(spec.help));
    }

    body.push_str("<button type=\"submit\">Predict</button></form>");
    page(&body)
}

/// The prediction result with the risk or no-risk message
pub fn result_page(result: &InferenceResult, missing: &[Field]) -> String {
    let class = match result.outcome {
        RiskOutcome::Present => "info",
        RiskOutcome::NotPresent => "success",
    };

    let mut body = String::from("<h3>Prediction Result:</h3>");
    let _ = write!(
        body,
        "<p class=\"{class}\" data-outcome=\"{outcome}\">{message}</p>",
        class = class,
        outcome = result.outcome.as_str(),
        message = escape(result.outcome.message())
    );

    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|f| escape(f.spec().label)).collect();
        let _ = write!(
            body,
            "<p class=\"help\">Estimated by the model from population data: {}</p>",
            names.join(", ")
        );
    }

    body.push_str("<p><a href=\"/\">New prediction</a></p>");
    page(&body)
}

/// Page shown when the model cannot produce a label
pub fn error_page(message: &str) -> String {
    page(&format!(
        "<p class=\"error\">Prediction failed: {}</p><p><a href=\"/\">Back</a></p>",
        escape(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_option_order() {
        assert_eq!(
            options(Field::ChestPainType.spec()),
            vec![NO_DATA_AVAILABLE, "Non-anginal_pain", "Typical_angina", "Atypical_angina", "Asymptomatic"]
        );
        assert_eq!(options(Field::ExerciseAngina.spec()), vec!["Yes", "No", NO_DATA_AVAILABLE]);
        assert_eq!(options(Field::Gender.spec()), vec!["Male", "Female"]);
    }

    #[test]
    fn test_defaults_are_control_minimums() {
        assert_eq!(default_value(Field::Age.spec()), "0");
        assert_eq!(default_value(Field::RestingBp.spec()), "-1");
        assert_eq!(default_value(Field::StDepression.spec()), "-0.1");
        assert_eq!(default_value(Field::StSlope.spec()), NO_DATA_AVAILABLE);
        assert_eq!(default_value(Field::FastingBloodSugarHigh.spec()), "Yes");
    }

    #[test]
    fn test_form_lists_every_field() {
        let html = form_page(None, &[]);
        for spec in &FIELDS {
            assert!(html.contains(&format!("name=\"{}\"", spec.name)), "{}", spec.name);
        }
        assert!(html.contains("max=\"1000\""));
        assert!(html.contains("step=\"0.1\""));
    }

    #[test]
    fn test_decimal_keeps_submitted_precision() {
        let observation = PatientObservation {
            age: 45,
            gender: "Male".into(),
            chest_pain_type: NO_DATA_AVAILABLE.into(),
            resting_bp: 120,
            serum_cholesterol: 200,
            fasting_blood_sugar_high: "No".into(),
            resting_ecg: "Normal".into(),
            max_heart_rate: 150,
            exercise_angina: "No".into(),
            st_depression: 0.25,
            st_slope: "Flat".into(),
            major_vessels_count: "Zero".into(),
        };
        assert_eq!(current_value(Field::StDepression.spec(), Some(&observation)), "0.25");
        assert_eq!(current_value(Field::StDepression.spec(), None), "-0.1");
    }

    #[test]
    fn test_rejected_form_shows_reason() {
        let html = rejected_form_page("age: invalid digit <found>");
        assert!(html.contains("Enter Patient Information"));
        assert!(html.contains("age: invalid digit &lt;found&gt;"));
    }

    #[test]
    fn test_result_messages() {
        let present = InferenceResult {
            label: "Present".into(),
            outcome: RiskOutcome::Present,
            latency_ms: 1,
        };
        let html = result_page(&present, &[Field::RestingBp]);
        assert!(html.contains("likely to have heart disease"));
        assert!(html.contains("Resting Blood Pressure"));

        let absent = InferenceResult {
            label: "Absent".into(),
            outcome: RiskOutcome::NotPresent,
            latency_ms: 1,
        };
        assert!(result_page(&absent, &[]).contains("regular check-ups"));
    }
}
