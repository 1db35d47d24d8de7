//! Inference pipeline: normalize, vectorize, classify

use crate::classifier::Classifier;
use crate::normalizer::{TextNormalizer, TokenSequence};
use crate::vectorizer::{FeatureVector, TfidfVectorizer};
use spamwatch_core::{Error, PredictionResult, Result};
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// Loaded pipeline of text normalizer, vectorizer and classifier.
///
/// All components are immutable after construction, so one pipeline can be
/// shared across threads behind an `Arc`.
pub struct InferencePipeline {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    classifier: Box<dyn Classifier>,
}

impl InferencePipeline {
    /// Assemble a pipeline, checking that the classifier accepts the
    /// vectorizer's output dimension
    pub fn new(vectorizer: TfidfVectorizer, classifier: Box<dyn Classifier>) -> Result<Self> {
        if classifier.n_features() != vectorizer.dim() {
            return Err(Error::artifact(format!(
                "classifier '{}' expects {} features but the vectorizer produces {}",
                classifier.name(),
                classifier.n_features(),
                vectorizer.dim()
            )));
        }

        Ok(Self {
            normalizer: TextNormalizer::new(),
            vectorizer,
            classifier,
        })
    }

    /// Stage 1: raw text to canonical tokens
    pub fn normalize(&self, raw: &str) -> TokenSequence {
        self.normalizer.normalize(raw)
    }

    /// Stage 2: canonical tokens to a TF-IDF vector
    pub fn vectorize(&self, tokens: &TokenSequence) -> FeatureVector {
        self.vectorizer.transform(&tokens.joined())
    }

    /// Run all stages on one message
    pub fn predict(&self, raw: &str) -> Result<PredictionResult> {
        let start = Instant::now();

        let tokens = self.normalize(raw);
        let features = self.vectorize(&tokens);
        let probs = self.classifier.predict_proba(&features)?;
        let result = PredictionResult::from_probabilities(probs.spam, probs.ham);

        debug!(
            tokens = tokens.len(),
            nnz = features.nnz(),
            label = %result.label,
            spam_probability = result.spam_probability,
            latency_us = start.elapsed().as_micros() as u64,
            "Classified message"
        );

        Ok(result)
    }

    /// Vectorizer output dimension
    pub fn dim(&self) -> usize {
        self.vectorizer.dim()
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}

impl fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("dim", &self.dim())
            .field("classifier", &self.classifier_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistic::{LogisticRegression, LogisticRegressionSpec};
    use crate::vectorizer::{Norm, VectorizerSpec, DEFAULT_TOKEN_PATTERN};
    use spamwatch_core::Label;

    fn vectorizer(terms: &[&str]) -> TfidfVectorizer {
        TfidfVectorizer::from_spec(VectorizerSpec {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: None,
            ngram_range: (1, 1),
            norm: Norm::L2,
            sublinear_tf: false,
            binary: false,
            lowercase: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        })
        .unwrap()
    }

    fn logistic(coef: Vec<f64>, intercept: f64) -> Box<dyn Classifier> {
        Box::new(
            LogisticRegression::from_spec(LogisticRegressionSpec {
                classes: vec!["ham".to_string(), "spam".to_string()],
                coef,
                intercept,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_pipeline_stages() {
        let pipeline = InferencePipeline::new(
            vectorizer(&["prize", "lunch"]),
            logistic(vec![4.0, -4.0], 0.0),
        )
        .unwrap();

        let tokens = pipeline.normalize("Claim your PRIZES!");
        assert_eq!(tokens.joined(), "claim prize");

        let features = pipeline.vectorize(&tokens);
        assert_eq!(features.indices(), &[0]);

        let result = pipeline.predict("Claim your PRIZES!").unwrap();
        assert_eq!(result.label, Label::Spam);

        let result = pipeline.predict("lunch?").unwrap();
        assert_eq!(result.label, Label::Ham);
    }

    #[test]
    fn test_empty_input_is_scored_and_ties_go_to_spam() {
        let pipeline =
            InferencePipeline::new(vectorizer(&["prize"]), logistic(vec![1.0], 0.0)).unwrap();

        let result = pipeline.predict("").unwrap();
        assert_eq!(result.spam_probability, 0.5);
        assert_eq!(result.ham_probability, 0.5);
        assert_eq!(result.label, Label::Spam);
        assert!(result.is_spam);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = InferencePipeline::new(vectorizer(&["a1", "b2"]), logistic(vec![1.0], 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }
}
