//! Loading pre-trained model artifacts
//!
//! An artifact is a self-describing JSON (or YAML) document in one of two
//! shapes:
//!
//! ```json
//! {"pipeline": [{"type": "text_normalizer"},
//!               {"type": "tfidf_vectorizer", "vocabulary": {...}, ...},
//!               {"type": "multinomial_nb", "classes": [...], ...}],
//!  "metadata": {"name": "...", "version": "..."}}
//! ```
//!
//! or a component mapping with `vectorizer` and `model` (alias
//! `classifier`) keys. A `preprocessor` entry in the mapping is ignored;
//! normalization is always the built-in English normalizer.
//!
//! Classifier parameters follow scikit-learn's public attributes
//! (`classes_`, `dual_coef_`, `intercept_`, `probA_`), with one exception:
//! the SVC `prob_b` field holds `-probB_`. See [`SvcSpec`].

use crate::classifier::ClassifierSpec;
use crate::logistic::LogisticRegressionSpec;
use crate::naive_bayes::NaiveBayesSpec;
use crate::pipeline::InferencePipeline;
use crate::svc::SvcSpec;
use crate::vectorizer::{TfidfVectorizer, VectorizerSpec};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use spamwatch_core::{Error, Result};
use std::path::Path;
use tracing::info;

/// Descriptive information carried by an artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// One stage of a composed pipeline artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StepSpec {
    TextNormalizer {},
    TfidfVectorizer(VectorizerSpec),
    MultinomialNb(NaiveBayesSpec),
    LogisticRegression(LogisticRegressionSpec),
    Svc(SvcSpec),
}

#[derive(Debug, Deserialize)]
struct PipelineArtifact {
    pipeline: Vec<StepSpec>,
    #[serde(default)]
    metadata: ArtifactMetadata,
}

#[derive(Debug, Deserialize)]
struct ComponentArtifact {
    vectorizer: VectorizerSpec,
    #[serde(alias = "classifier")]
    model: ClassifierSpec,
    #[serde(default)]
    metadata: ArtifactMetadata,
}

/// Validated artifact ready to serve predictions
#[derive(Debug)]
pub struct ModelArtifact {
    pub metadata: ArtifactMetadata,
    pub pipeline: InferencePipeline,
}

impl ModelArtifact {
    /// Load an artifact file; `.yaml`/`.yml` files are parsed as YAML,
    /// anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::artifact(format!("cannot read {}: {e}", path.display())))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let artifact = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        info!(
            path = %path.display(),
            name = artifact.metadata.name.as_deref().unwrap_or("unnamed"),
            classifier = artifact.pipeline.classifier_name(),
            features = artifact.pipeline.dim(),
            "Loaded model artifact"
        );

        Ok(artifact)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| Error::artifact(format!("artifact is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(content)
            .map_err(|e| Error::artifact(format!("artifact is not valid YAML: {e}")))?;
        Self::from_value(value)
    }

    /// Detect the artifact shape and build the pipeline
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let (vectorizer, classifier, metadata) = if value.get("pipeline").is_some() {
            let artifact: PipelineArtifact = parse(value, "pipeline artifact")?;
            let (vectorizer, classifier) = split_steps(artifact.pipeline)?;
            (vectorizer, classifier, artifact.metadata)
        } else if value.get("vectorizer").is_some() {
            let artifact: ComponentArtifact = parse(value, "component artifact")?;
            (artifact.vectorizer, artifact.model, artifact.metadata)
        } else {
            return Err(Error::artifact(
                "artifact must contain a 'pipeline' list or 'vectorizer' and 'model' entries",
            ));
        };

        let vectorizer = TfidfVectorizer::from_spec(vectorizer)?;
        let classifier = classifier.build()?;
        let pipeline = InferencePipeline::new(vectorizer, classifier)?;

        Ok(Self { metadata, pipeline })
    }
}

fn parse<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::artifact(format!("invalid {what}: {e}")))
}

/// Pull the vectorizer and classifier out of an ordered step list
fn split_steps(steps: Vec<StepSpec>) -> Result<(VectorizerSpec, ClassifierSpec)> {
    let mut vectorizer = None;
    let mut classifier = None;

    for (i, step) in steps.into_iter().enumerate() {
        let model = match step {
            StepSpec::TextNormalizer {} => {
                if vectorizer.is_some() {
                    return Err(Error::artifact(format!(
                        "step {i}: text_normalizer must come before the vectorizer"
                    )));
                }
                continue;
            }
            StepSpec::TfidfVectorizer(spec) => {
                if vectorizer.is_some() {
                    return Err(Error::artifact(format!("step {i}: second vectorizer")));
                }
                vectorizer = Some(spec);
                continue;
            }
            StepSpec::MultinomialNb(spec) => ClassifierSpec::MultinomialNb(spec),
            StepSpec::LogisticRegression(spec) => ClassifierSpec::LogisticRegression(spec),
            StepSpec::Svc(spec) => ClassifierSpec::Svc(spec),
        };

        if vectorizer.is_none() {
            return Err(Error::artifact(format!(
                "step {i}: classifier must come after the vectorizer"
            )));
        }
        if classifier.is_some() {
            return Err(Error::artifact(format!("step {i}: second classifier")));
        }
        classifier = Some(model);
    }

    match (vectorizer, classifier) {
        (Some(v), Some(c)) => Ok((v, c)),
        (None, _) => Err(Error::artifact("pipeline has no tfidf_vectorizer step")),
        (_, None) => Err(Error::artifact("pipeline has no classifier step")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vectorizer() -> serde_json::Value {
        json!({
            "vocabulary": {"prize": 0, "lunch": 1},
            "idf": [1.5, 1.2],
            "norm": "l2"
        })
    }

    fn model() -> serde_json::Value {
        json!({
            "type": "logistic_regression",
            "classes": ["ham", "spam"],
            "coef": [3.0, -3.0],
            "intercept": 0.0
        })
    }

    #[test]
    fn test_pipeline_shape() {
        let mut vec_step = vectorizer();
        vec_step["type"] = json!("tfidf_vectorizer");
        let doc = json!({
            "pipeline": [{"type": "text_normalizer", "stemmer": "porter"}, vec_step, model()],
            "metadata": {"name": "tiny", "version": "1"}
        });

        let artifact = ModelArtifact::from_value(doc).unwrap();
        assert_eq!(artifact.metadata.name.as_deref(), Some("tiny"));
        assert_eq!(artifact.pipeline.dim(), 2);
        assert_eq!(artifact.pipeline.classifier_name(), "logistic_regression");
    }

    #[test]
    fn test_component_shape_with_aliases() {
        let doc = json!({
            "preprocessor": "ignored",
            "vectorizer": vectorizer(),
            "classifier": model()
        });
        let artifact = ModelArtifact::from_value(doc).unwrap();
        assert_eq!(artifact.metadata, ArtifactMetadata::default());
        assert!(artifact.pipeline.predict("win a prize").unwrap().is_spam);
    }

    #[test]
    fn test_yaml_artifact() {
        let yaml = r#"
vectorizer:
  vocabulary: {prize: 0, lunch: 1}
model:
  type: logistic_regression
  classes: [spam, ham]
  coef: [1.0, 2.0]
"#;
        let artifact = ModelArtifact::from_yaml_str(yaml).unwrap();
        assert_eq!(artifact.pipeline.dim(), 2);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let mut bad = model();
        bad["coef"] = json!([1.0, 2.0, 3.0]);
        let doc = json!({"vectorizer": vectorizer(), "model": bad});
        assert!(matches!(ModelArtifact::from_value(doc), Err(Error::Artifact(_))));
    }

    #[test]
    fn test_step_order() {
        let mut vec_step = vectorizer();
        vec_step["type"] = json!("tfidf_vectorizer");

        let doc = json!({"pipeline": [model(), vec_step.clone()]});
        assert!(ModelArtifact::from_value(doc).is_err());

        let doc = json!({"pipeline": [vec_step.clone()]});
        assert!(ModelArtifact::from_value(doc).is_err());

        let doc = json!({"pipeline": [vec_step.clone(), model(), model()]});
        assert!(ModelArtifact::from_value(doc).is_err());

        let doc = json!({"pipeline": [vec_step, {"type": "text_normalizer"}, model()]});
        assert!(ModelArtifact::from_value(doc).is_err());
    }

    #[test]
    fn test_unrecognized_documents() {
        assert!(ModelArtifact::from_json_str("not json").is_err());
        assert!(ModelArtifact::from_value(json!({"weights": [1, 2]})).is_err());
        assert!(ModelArtifact::from_value(json!({"pipeline": [{"type": "random_forest"}]})).is_err());

        let doc = json!({
            "vectorizer": vectorizer(),
            "model": {"type": "logistic_regression", "classes": ["0", "1"], "coef": [1.0, 1.0]}
        });
        assert!(ModelArtifact::from_value(doc).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ModelArtifact::load("/nonexistent/spam_classifier.json").unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }
}
