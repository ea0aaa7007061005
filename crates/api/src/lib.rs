//! Heart Disease Risk API Server
//!
//! Serves the patient form and a JSON endpoint. Each submission is
//! bounds-checked, normalized into the 12-feature vector, and scored by the
//! classifier loaded once at startup.

use axum::Router;
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;
pub mod telemetry;
pub mod views;

pub use config::AppConfig;
pub use error::ApiError;
pub use telemetry::{init_logging, install_metrics};

use rate_limit::{create_governor_config, DefaultGovernorConfig};

/// Application state shared across handlers
///
/// Read-only after startup.
pub struct AppState {
    /// Loaded classifier
    pub engine: Arc<InferenceEngine>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus exporter, when installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state around a loaded engine
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router without rate limiting
pub fn create_router(state: Arc<AppState>) -> Router {
    build_router(state, None)
}

fn build_router(state: Arc<AppState>, governor: Option<Arc<DefaultGovernorConfig>>) -> Router {
    let mut submissions = routes::submission_routes();
    if let Some(config) = governor {
        submissions = submissions.layer(GovernorLayer { config });
    }

    Router::new()
        .merge(routes::page_routes())
        .merge(submissions)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the server
pub async fn run_server(config: &AppConfig, state: AppState) -> Result<(), ApiError> {
    let governor = create_governor_config(&config.rate_limit)?;
    let app = build_router(Arc::new(state), Some(governor));

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimitConfig;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use feature_normalizer::FeatureVector;
    use inference_engine::{InferenceError, Predictor};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const FORM: &str = "age=45&gender=Male&chest_pain_type=No+Data+Available&resting_bp=-1\
        &serum_cholesterol=200&fasting_blood_sugar_high=No&resting_ecg=Normal&max_heart_rate=150\
        &exercise_angina=No&st_depression=-0.1&st_slope=Flat&major_vessels_count=Zero";

    fn app_with(engine: InferenceEngine) -> Router {
        create_router(Arc::new(AppState::new(Arc::new(engine))))
    }

    fn app(label: &str) -> Router {
        app_with(InferenceEngine::mock(label))
    }

    fn scenario() -> Value {
        json!({
            "age": 45,
            "gender": "Male",
            "chest_pain_type": "No Data Available",
            "resting_bp": -1,
            "serum_cholesterol": 200,
            "fasting_blood_sugar_high": "No",
            "resting_ecg": "Normal",
            "max_heart_rate": 150,
            "exercise_angina": "No",
            "st_depression": -0.1,
            "st_slope": "Flat",
            "major_vessels_count": "Zero"
        })
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(body: String) -> Request<Body> {
        Request::post("/predict")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::post("/api/v1/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_page() {
        let response = app("Present")
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Enter Patient Information"));
        assert!(html.contains("No Data Available"));
    }

    #[tokio::test]
    async fn test_form_submission_present() {
        let response = app("Present").oneshot(post_form(FORM.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("data-outcome=\"present\""));
        assert!(html.contains("Please consult a doctor"));
    }

    #[tokio::test]
    async fn test_form_submission_other_label() {
        let response = app("Absent").oneshot(post_form(FORM.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("data-outcome=\"not_present\""));
        assert!(html.contains("regular check-ups"));
    }

    #[tokio::test]
    async fn test_form_rejects_out_of_range() {
        let body = FORM.replace("age=45", "age=130");
        let response = app("Present").oneshot(post_form(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("age value 130 is out of range"));
        assert!(html.contains("value=\"130\""));
    }

    #[tokio::test]
    async fn test_rejected_form_keeps_decimal_precision() {
        let body = FORM
            .replace("st_depression=-0.1", "st_depression=0.25")
            .replace("age=45", "age=130");
        let response = app("Present").oneshot(post_form(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("value=\"0.25\""));
        assert!(!html.contains("value=\"0.2\""));
    }

    #[tokio::test]
    async fn test_undecodable_form_renders_form() {
        let body = FORM.replace("age=45", "age=abc");
        let response = app("Present").oneshot(post_form(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = body_text(response).await;
        assert!(html.contains("Enter Patient Information"));
        assert!(html.contains("class=\"error\""));
    }

    #[tokio::test]
    async fn test_json_prediction_maps_sentinels() {
        let response = app("Present").oneshot(post_json(&scenario())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["label"], "Present");
        assert_eq!(body["outcome"], "present");
        assert_eq!(
            body["features"],
            json!([45, "Male", null, null, 200, "No", "Normal", 150, "No", null, "Flat", "Zero"])
        );
        assert_eq!(
            body["missing_fields"],
            json!(["chest_pain_type", "resting_bp", "st_depression"])
        );
    }

    #[tokio::test]
    async fn test_json_validation_errors() {
        let mut observation = scenario();
        observation["st_slope"] = json!("Sideways");
        observation["max_heart_rate"] = json!(400);

        let response = app("Present").oneshot(post_json(&observation)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["max_heart_rate", "st_slope"]);
    }

    struct BrokenModel;

    impl Predictor for BrokenModel {
        fn predict(&self, _: &FeatureVector) -> Result<String, InferenceError> {
            Err(InferenceError::InferenceFailed("incompatible schema".into()))
        }
    }

    #[tokio::test]
    async fn test_predictor_failure_is_server_error() {
        let app = app_with(InferenceEngine::with_predictor(BrokenModel, "broken", "Present"));

        let response = app.clone().oneshot(post_json(&scenario())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("incompatible schema"));

        let response = app.oneshot(post_form(FORM.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app("Present")
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"]["path"], "mock");
        assert_eq!(body["model"]["positive_label"], "Present");
    }

    fn from_peer(mut request: Request<Body>) -> Request<Body> {
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        request
    }

    #[tokio::test]
    async fn test_submissions_are_rate_limited() {
        let governor = create_governor_config(&RateLimitConfig::default()).unwrap();
        let state = Arc::new(AppState::new(Arc::new(InferenceEngine::mock("Present"))));
        let app = build_router(state, Some(governor));

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(from_peer(post_json(&scenario())))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(from_peer(post_form(FORM.to_string())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        // Pages stay reachable once the submission quota is spent
        for path in ["/api/v1/health", "/"] {
            let response = app
                .clone()
                .oneshot(from_peer(Request::get(path).body(Body::empty()).unwrap()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_metrics_without_exporter() {
        let response = app("Present")
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
