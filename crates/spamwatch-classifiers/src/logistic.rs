//! Binary logistic regression

use crate::classifier::{
    check_dimension, check_finite, sigmoid, BinaryClasses, ClassProbabilities, Classifier,
};
use crate::vectorizer::FeatureVector;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Result};

/// Serialized logistic regression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    /// Class names; `classes[1]` is the positive side of the decision function
    pub classes: Vec<String>,

    /// One weight per feature
    pub coef: Vec<f64>,

    #[serde(default)]
    pub intercept: f64,
}

/// Logistic regression over TF-IDF features
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: BinaryClasses,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn from_spec(spec: LogisticRegressionSpec) -> Result<Self> {
        let classes = BinaryClasses::from_labels(&spec.classes)?;
        if spec.coef.is_empty() {
            return Err(Error::artifact("logistic regression has no coefficients"));
        }
        check_finite("coef", &spec.coef)?;
        check_finite("intercept", &[spec.intercept])?;

        Ok(Self {
            classes,
            coef: spec.coef,
            intercept: spec.intercept,
        })
    }

    /// Signed distance to the decision boundary, positive toward `classes[1]`
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        check_dimension(features, self.n_features())?;
        Ok(features.dot_dense(&self.coef)? + self.intercept)
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let z = self.decision_function(features)?;
        self.classes.positive(sigmoid(z)).validated()
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
