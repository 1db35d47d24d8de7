//! Classifier trait and common types

use crate::logistic::{LogisticRegression, LogisticRegressionSpec};
use crate::naive_bayes::{MultinomialNb, NaiveBayesSpec};
use crate::svc::{Svc, SvcSpec};
use crate::vectorizer::FeatureVector;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Label, Result};

/// Allowed drift of `spam + ham` away from 1.0
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Trait for pre-trained binary spam/ham classifiers
pub trait Classifier: Send + Sync {
    /// Probability distribution over {spam, ham} for one feature vector
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities>;

    /// Number of input features the classifier was trained on
    fn n_features(&self) -> usize;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Probability of each class for one message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub spam: f64,
    pub ham: f64,
}

impl ClassProbabilities {
    /// Check that both probabilities are finite, within [0, 1] and sum to 1
    pub fn validated(self) -> Result<Self> {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_range(self.spam) || !in_range(self.ham) {
            return Err(Error::transform(format!(
                "classifier produced invalid probabilities (spam={}, ham={})",
                self.spam, self.ham
            )));
        }
        if (self.spam + self.ham - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(Error::transform(format!(
                "class probabilities sum to {}",
                self.spam + self.ham
            )));
        }
        Ok(self)
    }
}

/// Mapping between a model's class order and the spam/ham labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryClasses {
    spam_index: usize,
}

impl BinaryClasses {
    /// Resolve a class list, which must be exactly `spam` and `ham` in any order
    pub fn from_labels(classes: &[String]) -> Result<Self> {
        let position = |label: Label| classes.iter().position(|c| c == label.as_str());
        match (classes.len(), position(Label::Spam), position(Label::Ham)) {
            (2, Some(spam_index), Some(_)) => Ok(Self { spam_index }),
            _ => Err(Error::artifact(format!(
                "classes must be exactly [\"spam\", \"ham\"] in some order, got {classes:?}"
            ))),
        }
    }

    /// Index of the spam class in the model's class order
    pub fn spam_index(&self) -> usize {
        self.spam_index
    }

    /// Map per-class scores in model order to spam/ham
    pub fn probabilities(&self, per_class: [f64; 2]) -> ClassProbabilities {
        ClassProbabilities {
            spam: per_class[self.spam_index],
            ham: per_class[1 - self.spam_index],
        }
    }

    /// Map the probability of `classes[1]` (the positive side of a binary
    /// decision function) to spam/ham
    pub fn positive(&self, p_positive: f64) -> ClassProbabilities {
        self.probabilities([1.0 - p_positive, p_positive])
    }
}

/// Serialized classifier, tagged by model family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierSpec {
    MultinomialNb(NaiveBayesSpec),
    LogisticRegression(LogisticRegressionSpec),
    Svc(SvcSpec),
}

impl ClassifierSpec {
    /// Validate parameters and build the classifier
    pub fn build(self) -> Result<Box<dyn Classifier>> {
        Ok(match self {
            Self::MultinomialNb(spec) => Box::new(MultinomialNb::from_spec(spec)?),
            Self::LogisticRegression(spec) => Box::new(LogisticRegression::from_spec(spec)?),
            Self::Svc(spec) => Box::new(Svc::from_spec(spec)?),
        })
    }
}

/// Reject a vector whose dimension differs from the classifier's
pub(crate) fn check_dimension(features: &FeatureVector, expected: usize) -> Result<()> {
    if features.dim() != expected {
        return Err(Error::transform(format!(
            "feature vector has dimension {}, classifier expects {}",
            features.dim(),
            expected
        )));
    }
    Ok(())
}

/// Reject parameter arrays containing NaN or infinities
pub(crate) fn check_finite(what: &str, values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::artifact(format!("{what} contains non-finite values")));
    }
    Ok(())
}

/// Numerically stable logistic function
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
