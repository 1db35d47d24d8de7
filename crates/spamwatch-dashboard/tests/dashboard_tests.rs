//! Dashboard tests against a live API on an ephemeral port

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use spamwatch_api::{create_router, AppState};
use spamwatch_classifiers::{ClassifierConfig, SpamClassifier};
use spamwatch_dashboard::{build_app, ApiClient, DashboardState, EXAMPLE_MESSAGES};
use std::path::PathBuf;
use tower::ServiceExt;

/// Serve the prediction API in the background and return its base URL
async fn spawn_api(model_path: PathBuf) -> String {
    let classifier = SpamClassifier::load(&ClassifierConfig::with_model_path(model_path));
    let app = create_router(AppState::new(classifier));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn bundled_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/spam_classifier.json")
}

fn dashboard(api_url: &str) -> Router {
    build_app(DashboardState {
        client: ApiClient::new(api_url).unwrap(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn classify_request(text: &str) -> Request<Body> {
    Request::post("/api/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_classify_through_api() {
    let api_url = spawn_api(bundled_model_path()).await;

    let (status, body) = send(
        dashboard(&api_url),
        classify_request("Congratulations! You've won a $1000 gift card. Click here to claim."),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "spam");
    assert_eq!(body["is_spam"], true);
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let (status, body) = send(dashboard("http://127.0.0.1:9"), classify_request("   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_null_or_malformed_message_is_rejected_as_json() {
    let app = dashboard("http://127.0.0.1:9");

    let null_text = Request::post("/api/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text": null}"#))
        .unwrap();
    let (status, body) = send(app.clone(), null_text).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a message to check");

    let missing = Request::post("/api/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(app.clone(), missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        app,
        Request::post("/api/classify").body(Body::from("not json")).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_examples_table() {
    let api_url = spawn_api(bundled_model_path()).await;

    let (status, body) = send(
        dashboard(&api_url),
        Request::get("/api/examples").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), EXAMPLE_MESSAGES.len());

    assert_eq!(rows[0]["verdict"], "Spam");
    assert_eq!(rows[1]["verdict"], "Not spam");
    assert_eq!(rows[1]["message"], "Hey, are we still meeting for lunch tomorrow?");
    assert!(rows[2]["message"].as_str().unwrap().ends_with("..."));
    assert!(rows[2]["spam_probability"].as_str().unwrap().ends_with('%'));
}

#[tokio::test]
async fn test_unreachable_api_becomes_error_rows() {
    let app = dashboard("http://127.0.0.1:9");

    let (status, body) = send(
        app.clone(),
        Request::get("/api/examples").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for row in body["rows"].as_array().unwrap() {
        assert!(row["error"].as_str().unwrap().starts_with("Connection error"));
    }

    let (status, body) = send(app.clone(), classify_request("hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().starts_with("Connection error"));

    let (_, body) = send(app, Request::get("/api/health").body(Body::empty()).unwrap()).await;
    assert!(body["api"]["error"].is_string());
}

#[tokio::test]
async fn test_health_relays_degraded_api() {
    let api_url = spawn_api(PathBuf::from("/nonexistent/model.json")).await;

    let (_, body) = send(
        dashboard(&api_url),
        Request::get("/api/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(body["api"]["status"], "unhealthy");
    assert_eq!(body["api"]["model_loaded"], false);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let response = dashboard("http://127.0.0.1:9")
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Spam Message Classifier"));
}

#[tokio::test]
async fn test_unknown_page_serves_dashboard() {
    let response = dashboard("http://127.0.0.1:9")
        .oneshot(Request::get("/history").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
}
