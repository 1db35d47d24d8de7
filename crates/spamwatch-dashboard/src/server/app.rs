use crate::client::ApiClient;
use crate::server::{routes, static_files};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Environment variable that opens CORS to every origin
pub const ALLOW_ANY_ORIGIN_ENV: &str = "SPAMWATCH_DASHBOARD_ALLOW_ANY_ORIGIN";

/// Shared dashboard state
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub client: ApiClient,
}

/// Build the Axum application
pub fn build_app(state: DashboardState) -> Router {
    // CORS defaults to local origins; override only for explicit use.
    let allow_any_origin = std::env::var(ALLOW_ANY_ORIGIN_ENV)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:8501"),
                HeaderValue::from_static("http://127.0.0.1:8501"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route("/classify", post(routes::classify))
        .route("/examples", get(routes::examples))
        .route("/health", get(routes::health));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server
pub async fn run_server(client: ApiClient, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("Using prediction API at {}", client.base_url());
    let app = build_app(DashboardState { client });

    tracing::info!("Starting SpamWatch dashboard on {}", addr);
    tracing::info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
