//! Core types for SpamWatch

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label attached to a classified message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Unsolicited or fraudulent message (the positive class)
    Spam,
    /// Legitimate message (the negative class)
    Ham,
    /// Scoring failed; probabilities are uninformative
    Error,
}

impl Label {
    /// Name as it appears in artifacts and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Ham => "ham",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictionSource {
    /// Full normalizer + vectorizer + classifier pipeline
    #[default]
    Model,
    /// Keyword heuristic used while the model is unavailable
    Heuristic,
    /// Scoring failed for this message
    Error,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Heuristic => "heuristic",
            Self::Error => "error",
        }
    }
}

/// Outcome of classifying one message.
///
/// Serializes to the response body of the prediction endpoint:
/// `prediction`, `spam_probability`, `ham_probability`, `is_spam` and,
/// for failed predictions only, `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label
    #[serde(rename = "prediction")]
    pub label: Label,

    /// Probability of the spam class (0.0-1.0)
    pub spam_probability: f64,

    /// Probability of the ham class (0.0-1.0)
    pub ham_probability: f64,

    /// `true` iff `label` is spam
    pub is_spam: bool,

    /// Diagnostic message when scoring failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Path that produced this result (not part of the wire format)
    #[serde(skip)]
    pub source: PredictionSource,
}

impl PredictionResult {
    /// Build a model-backed result from class probabilities.
    ///
    /// Ties resolve to spam.
    pub fn from_probabilities(spam_probability: f64, ham_probability: f64) -> Self {
        let label = if spam_probability >= ham_probability {
            Label::Spam
        } else {
            Label::Ham
        };

        Self {
            label,
            spam_probability,
            ham_probability,
            is_spam: label == Label::Spam,
            error: None,
            source: PredictionSource::Model,
        }
    }

    /// Build a heuristic result from a spam score.
    ///
    /// The heuristic only calls spam above 0.5, so a 0.5 score is ham.
    pub fn from_heuristic_score(score: f64) -> Self {
        let label = if score > 0.5 { Label::Spam } else { Label::Ham };

        Self {
            label,
            spam_probability: score,
            ham_probability: 1.0 - score,
            is_spam: label == Label::Spam,
            error: None,
            source: PredictionSource::Heuristic,
        }
    }

    /// Result returned when scoring failed
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            label: Label::Error,
            spam_probability: 0.5,
            ham_probability: 0.5,
            is_spam: false,
            error: Some(message.into()),
            source: PredictionSource::Error,
        }
    }

    /// Whether this result came from a failed prediction
    pub fn is_error(&self) -> bool {
        self.label == Label::Error
    }
}

/// Operating state of the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Model artifact loaded; full pipeline available
    Ready,
    /// Model artifact unavailable; keyword heuristic active
    Degraded,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Degraded => "degraded",
        }
    }
}

/// Body of the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` or `unhealthy`
    pub status: String,

    /// Whether the model artifact is loaded
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn from_mode(mode: ServiceMode) -> Self {
        match mode {
            ServiceMode::Ready => Self {
                status: "healthy".to_string(),
                model_loaded: true,
            },
            ServiceMode::Degraded => Self {
                status: "unhealthy".to_string(),
                model_loaded: false,
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.model_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_resolves_to_spam() {
        let result = PredictionResult::from_probabilities(0.5, 0.5);
        assert_eq!(result.label, Label::Spam);
        assert!(result.is_spam);
        assert_eq!(result.source, PredictionSource::Model);
    }

    #[test]
    fn test_heuristic_threshold_is_strict() {
        let result = PredictionResult::from_heuristic_score(0.5);
        assert_eq!(result.label, Label::Ham);
        assert!(!result.is_spam);

        let result = PredictionResult::from_heuristic_score(0.6);
        assert_eq!(result.label, Label::Spam);
        assert!(result.is_spam);
        assert_eq!(result.source, PredictionSource::Heuristic);
    }

    #[test]
    fn test_error_result() {
        let result = PredictionResult::error("shape mismatch");
        assert!(result.is_error());
        assert!(!result.is_spam);
        assert_eq!(result.spam_probability, 0.5);
        assert_eq!(result.ham_probability, 0.5);
        assert_eq!(result.error.as_deref(), Some("shape mismatch"));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(PredictionResult::from_probabilities(0.2, 0.8)).unwrap();
        assert_eq!(json["prediction"], "ham");
        assert_eq!(json["is_spam"], false);
        assert!(json.get("error").is_none());
        assert!(json.get("source").is_none());

        let json = serde_json::to_value(PredictionResult::error("boom")).unwrap();
        assert_eq!(json["prediction"], "error");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_health_from_mode() {
        let health = HealthStatus::from_mode(ServiceMode::Ready);
        assert_eq!(health.status, "healthy");
        assert!(health.model_loaded);

        let health = HealthStatus::from_mode(ServiceMode::Degraded);
        assert_eq!(health.status, "unhealthy");
        assert!(!health.is_healthy());
    }
}
