//! Multinomial naive Bayes

use crate::classifier::{check_dimension, check_finite, BinaryClasses, ClassProbabilities, Classifier};
use crate::vectorizer::FeatureVector;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Result};

/// Serialized multinomial naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesSpec {
    /// Class names in model order
    pub classes: Vec<String>,

    /// Log prior per class
    pub class_log_prior: Vec<f64>,

    /// Log probability of each feature given each class, one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// Multinomial naive Bayes over TF-IDF features
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: BinaryClasses,
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    pub fn from_spec(spec: NaiveBayesSpec) -> Result<Self> {
        let classes = BinaryClasses::from_labels(&spec.classes)?;

        let class_log_prior: [f64; 2] = spec.class_log_prior.try_into().map_err(|v: Vec<f64>| {
            Error::artifact(format!("class_log_prior has {} entries, expected 2", v.len()))
        })?;
        check_finite("class_log_prior", &class_log_prior)?;

        let [first, second]: [Vec<f64>; 2] =
            spec.feature_log_prob.try_into().map_err(|v: Vec<Vec<f64>>| {
                Error::artifact(format!("feature_log_prob has {} rows, expected 2", v.len()))
            })?;
        if first.is_empty() || first.len() != second.len() {
            return Err(Error::artifact(format!(
                "feature_log_prob rows have lengths {} and {}",
                first.len(),
                second.len()
            )));
        }
        check_finite("feature_log_prob", &first)?;
        check_finite("feature_log_prob", &second)?;

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob: [first, second],
        })
    }

    /// Unnormalized log posterior per class, in model order
    fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        Ok([
            self.class_log_prior[0] + features.dot_dense(&self.feature_log_prob[0])?,
            self.class_log_prior[1] + features.dot_dense(&self.feature_log_prob[1])?,
        ])
    }
}

impl Classifier for MultinomialNb {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        check_dimension(features, self.n_features())?;

        let jll = self.joint_log_likelihood(features)?;
        let max = jll[0].max(jll[1]);
        let exp = [(jll[0] - max).exp(), (jll[1] - max).exp()];
        let total = exp[0] + exp[1];

        self.classes
            .probabilities([exp[0] / total, exp[1] / total])
            .validated()
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn name(&self) -> &str {
        "multinomial_nb"
    }
}
