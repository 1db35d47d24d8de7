use crate::client::ApiReply;
use crate::examples::{classify_examples, EXAMPLE_MESSAGES};
use crate::server::DashboardState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// Classification endpoints
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn classify(State(state): State<DashboardState>, body: Bytes) -> impl IntoResponse {
    let req: ClassifyRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid request body: {e}") })),
            )
        }
    };

    let text = req.text.unwrap_or_default();
    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Please enter a message to check" })),
        );
    }

    let reply = state.client.predict(&text).await;
    if let ApiReply::Failed { error } = &reply {
        tracing::warn!(error = %error, "Classification through the API failed");
    }
    (StatusCode::OK, Json(json!(reply)))
}

pub async fn examples(State(state): State<DashboardState>) -> impl IntoResponse {
    let rows = classify_examples(&state.client).await;
    Json(json!({
        "count": EXAMPLE_MESSAGES.len(),
        "rows": rows,
    }))
}

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health(State(state): State<DashboardState>) -> impl IntoResponse {
    Json(json!({
        "api_url": state.client.base_url(),
        "api": state.client.health().await,
    }))
}
