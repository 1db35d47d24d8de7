//! The classification service shared by request handlers

use crate::artifact::{ArtifactMetadata, ModelArtifact};
use crate::config::ClassifierConfig;
use crate::heuristic::KeywordHeuristic;
use crate::pipeline::InferencePipeline;
use serde::Serialize;
use spamwatch_core::{HealthStatus, PredictionResult, Result, ServiceMode};
use tracing::{info, warn};

/// Summary of the loaded model, reported by the service banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub classifier: String,
    pub features: usize,
}

enum State {
    Ready {
        pipeline: InferencePipeline,
        metadata: ArtifactMetadata,
    },
    Degraded {
        reason: String,
    },
}

/// Spam classifier with a keyword fallback.
///
/// The mode is fixed at construction: `Ready` when the artifact loaded,
/// `Degraded` otherwise. There is no transition back to `Ready` without
/// building a new instance.
pub struct SpamClassifier {
    state: State,
    heuristic: KeywordHeuristic,
}

impl SpamClassifier {
    /// Load the configured artifact. Never fails: a missing or invalid
    /// artifact puts the service in degraded mode.
    pub fn load(config: &ClassifierConfig) -> Self {
        let heuristic = match KeywordHeuristic::new(&config.fallback.keywords) {
            Ok(heuristic) => heuristic,
            Err(e) => {
                warn!(error = %e, "Invalid fallback keywords, using defaults");
                KeywordHeuristic::default()
            }
        };

        match ModelArtifact::load(&config.model_path) {
            Ok(artifact) => {
                info!(mode = "ready", "Spam classifier ready");
                Self {
                    state: State::Ready {
                        pipeline: artifact.pipeline,
                        metadata: artifact.metadata,
                    },
                    heuristic,
                }
            }
            Err(e) => {
                warn!(
                    path = %config.model_path.display(),
                    error = %e,
                    "Model artifact unavailable, falling back to keyword heuristic"
                );
                Self {
                    state: State::Degraded {
                        reason: e.to_string(),
                    },
                    heuristic,
                }
            }
        }
    }

    /// Ready service around an already-built pipeline
    pub fn from_pipeline(pipeline: InferencePipeline) -> Self {
        Self {
            state: State::Ready {
                pipeline,
                metadata: ArtifactMetadata::default(),
            },
            heuristic: KeywordHeuristic::default(),
        }
    }

    /// Ready service from a loaded artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            state: State::Ready {
                pipeline: artifact.pipeline,
                metadata: artifact.metadata,
            },
            heuristic: KeywordHeuristic::default(),
        }
    }

    /// Degraded service using the default keyword heuristic
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: State::Degraded {
                reason: reason.into(),
            },
            heuristic: KeywordHeuristic::default(),
        }
    }

    pub fn mode(&self) -> ServiceMode {
        match self.state {
            State::Ready { .. } => ServiceMode::Ready,
            State::Degraded { .. } => ServiceMode::Degraded,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.mode() == ServiceMode::Ready
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::from_mode(self.mode())
    }

    /// Why the model could not be loaded, in degraded mode
    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.state {
            State::Ready { .. } => None,
            State::Degraded { reason } => Some(reason),
        }
    }

    pub fn model_info(&self) -> Option<ModelInfo> {
        match &self.state {
            State::Ready { pipeline, metadata } => Some(ModelInfo {
                name: metadata.name.clone(),
                version: metadata.version.clone(),
                classifier: pipeline.classifier_name().to_string(),
                features: pipeline.dim(),
            }),
            State::Degraded { .. } => None,
        }
    }

    /// Classify, surfacing pipeline errors to the caller
    pub fn try_classify(&self, text: &str) -> Result<PredictionResult> {
        match &self.state {
            State::Ready { pipeline, .. } => pipeline.predict(text),
            State::Degraded { .. } => Ok(self.heuristic.classify(text)),
        }
    }

    /// Classify one message. Pipeline errors become an `error` result.
    pub fn classify(&self, text: &str) -> PredictionResult {
        self.try_classify(text).unwrap_or_else(|e| {
            warn!(error = %e, "Prediction failed");
            PredictionResult::error(e.to_string())
        })
    }

    /// Classify a message that may be absent; absent text is empty
    pub fn classify_opt(&self, text: Option<&str>) -> PredictionResult {
        self.classify(text.unwrap_or_default())
    }
}

impl std::fmt::Debug for SpamClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpamClassifier")
            .field("mode", &self.mode())
            .field("model", &self.model_info())
            .finish()
    }
}
