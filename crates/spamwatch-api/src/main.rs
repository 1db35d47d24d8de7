//! SpamWatch API server
//!
//! Loads the model artifact once, then serves predictions until SIGINT or
//! SIGTERM. A missing or invalid artifact does not stop startup; the
//! service runs degraded on the keyword heuristic.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use spamwatch_api::{create_router, ApiConfig, AppState, Cli};
use spamwatch_classifiers::SpamClassifier;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting SpamWatch API");

    let config = ApiConfig::load(&cli.config, &cli)?;
    info!("Model artifact: {}", config.classifier.model_path.display());

    let metrics_handle = init_metrics()?;

    let classifier = SpamClassifier::load(&config.classifier);
    info!("Classifier mode: {}", classifier.mode().as_str());
    let state = AppState::new(classifier).with_metrics(metrics_handle);

    let addr = config.socket_addr()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamwatch_api=debug,spamwatch_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spamwatch_api=info,spamwatch_classifiers=info")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamwatch_requests_total",
        "Total number of prediction requests"
    );
    metrics::describe_counter!(
        "spamwatch_predictions_total",
        "Predictions by label and source (model, heuristic, error)"
    );
    metrics::describe_histogram!(
        "spamwatch_inference_latency_us",
        metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );
    metrics::describe_counter!("spamwatch_errors_total", "Total number of errors by type");

    info!("Metrics exporter initialized");
    Ok(handle)
}
