//! HTML form routes

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use feature_normalizer::PatientObservation;
use std::sync::Arc;
use tracing::{error, warn};

use super::assess;
use crate::error::ApiError;
use crate::telemetry;
use crate::views;
use crate::AppState;

/// Render the empty patient form
pub async fn show_form() -> Html<String> {
    Html(views::form_page(None, &[]))
}

/// Score a form submission and render the result page
///
/// A body that does not decode into an observation gets the blank form back
/// with the decoder's reason.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<PatientObservation>, FormRejection>,
) -> Response {
    let observation = match form {
        Ok(Form(observation)) => observation,
        Err(rejection) => {
            warn!("Undecodable form submission: {}", rejection.body_text());
            telemetry::record_rejection();
            return (
                rejection.status(),
                Html(views::rejected_form_page(&rejection.body_text())),
            )
                .into_response();
        }
    };
    let submitted = observation.clone();

    match assess(&state.engine, observation) {
        Ok(assessment) => Html(views::result_page(
            &assessment.result,
            &assessment.features.missing_fields(),
        ))
        .into_response(),
        Err(ApiError::Validation(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::form_page(Some(&submitted), &errors)),
        )
            .into_response(),
        Err(e) => {
            error!("Prediction failed: {}", e);
            (e.status(), Html(views::error_page(&e.to_string()))).into_response()
        }
    }
}
