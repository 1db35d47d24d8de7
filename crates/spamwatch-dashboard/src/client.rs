//! HTTP client for the prediction API

use serde::{Deserialize, Serialize};
use serde_json::json;
use spamwatch_core::{HealthStatus, PredictionResult};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reply from the API, or a description of why there is none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiReply<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> ApiReply<T> {
    fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

/// Client for the SpamWatch API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify one message. Connection and API failures are returned as
    /// `Failed`, never as errors.
    pub async fn predict(&self, text: &str) -> ApiReply<PredictionResult> {
        let url = format!("{}/predict", self.base_url);
        debug!(%url, "Requesting prediction");

        let response = match self.http.post(&url).json(&json!({ "text": text })).send().await {
            Ok(response) => response,
            Err(e) => return ApiReply::failed(format!("Connection error: {e}")),
        };
        if !response.status().is_success() {
            return ApiReply::failed(format!("API error: {}", response.status().as_u16()));
        }

        match response.json::<PredictionResult>().await {
            Ok(result) => match result.error {
                Some(error) => ApiReply::failed(error),
                None => ApiReply::Ok(result),
            },
            Err(e) => ApiReply::failed(format!("Invalid API response: {e}")),
        }
    }

    pub async fn health(&self) -> ApiReply<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return ApiReply::failed(format!("Connection error: {e}")),
        };
        if !response.status().is_success() {
            return ApiReply::failed(format!("API error: {}", response.status().as_u16()));
        }

        match response.json::<HealthStatus>().await {
            Ok(health) => ApiReply::Ok(health),
            Err(e) => ApiReply::failed(format!("Invalid API response: {e}")),
        }
    }
}
