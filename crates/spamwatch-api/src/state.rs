//! Shared application state

use metrics_exporter_prometheus::PrometheusHandle;
use spamwatch_classifiers::SpamClassifier;
use std::sync::Arc;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Loaded classifier, read-only after startup
    pub classifier: Arc<SpamClassifier>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(classifier: SpamClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
