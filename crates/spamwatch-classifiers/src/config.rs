//! Configuration for the classification service

use crate::heuristic::DEFAULT_SPAM_KEYWORDS;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Default location of the bundled model artifact
pub const DEFAULT_MODEL_PATH: &str = "models/spam_classifier.json";

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the model artifact (JSON, or YAML by extension)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Keyword heuristic used when the artifact cannot be loaded
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Degraded-mode heuristic settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_keywords() -> Vec<String> {
    DEFAULT_SPAM_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

impl ClassifierConfig {
    /// Configuration pointing at a specific artifact, other settings default
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: path.into(),
            ..Default::default()
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }
}
