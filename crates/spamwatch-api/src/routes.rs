//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{header::HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use spamwatch_classifiers::ModelInfo;
use spamwatch_core::{HealthStatus, PredictionResult, ServiceMode};
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service banner
#[derive(Debug, Serialize)]
struct Banner {
    message: &'static str,
    status: &'static str,
    mode: ServiceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<ModelInfo>,
}

async fn root(State(state): State<AppState>) -> Json<Banner> {
    Json(Banner {
        message: "Spam Classification API",
        status: "running",
        mode: state.classifier.mode(),
        model: state.classifier.model_info(),
    })
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.classifier.health())
}

async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(AppError::MetricsUnavailable)
}

/// Classify the `text` field of a JSON body.
///
/// A missing, null or non-string `text` is treated as an empty message.
async fn predict(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    metrics::counter!("spamwatch_requests_total").increment(1);
    let request_id = Uuid::new_v4().to_string();

    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        metrics::counter!("spamwatch_errors_total", "type" => "invalid_request").increment(1);
        AppError::InvalidRequest(format!("request body is not valid JSON: {e}"))
    })?;
    let text = extract_text(&body);

    let start = Instant::now();
    let result = state.classifier.classify(text);
    let latency_us = start.elapsed().as_micros() as u64;

    record_prediction(&result, latency_us);
    if let Some(error) = &result.error {
        warn!(request_id = %request_id, error = %error, "Prediction returned an error result");
    } else {
        debug!(
            request_id = %request_id,
            chars = text.chars().count(),
            prediction = %result.label,
            spam_probability = result.spam_probability,
            latency_us,
            "Prediction complete"
        );
    }

    Ok(([(REQUEST_ID_HEADER, request_id)], Json(result)).into_response())
}

fn extract_text(body: &Value) -> &str {
    body.get("text").and_then(Value::as_str).unwrap_or_default()
}

fn record_prediction(result: &PredictionResult, latency_us: u64) {
    metrics::counter!(
        "spamwatch_predictions_total",
        "label" => result.label.as_str(),
        "source" => result.source.as_str()
    )
    .increment(1);
    metrics::histogram!("spamwatch_inference_latency_us").record(latency_us as f64);
    if result.is_error() {
        metrics::counter!("spamwatch_errors_total", "type" => "prediction").increment(1);
    }
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    MetricsUnavailable,
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg, "invalid_request_error")
            }
            AppError::MetricsUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "metrics exporter is not installed".to_string(),
                "unavailable_error",
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found".to_string(),
                "not_found_error",
            ),
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
