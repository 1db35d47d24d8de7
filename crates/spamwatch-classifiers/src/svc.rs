//! Kernel support vector classifier with Platt-scaled probabilities

use crate::classifier::{
    check_dimension, check_finite, sigmoid, BinaryClasses, ClassProbabilities, Classifier,
};
use crate::vectorizer::FeatureVector;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Result};

/// Kernel function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: u32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    fn parameters(&self) -> Vec<f64> {
        match *self {
            Kernel::Linear => Vec::new(),
            Kernel::Rbf { gamma } => vec![gamma],
            Kernel::Poly { gamma, coef0, .. } | Kernel::Sigmoid { gamma, coef0 } => {
                vec![gamma, coef0]
            }
        }
    }

    /// `K(sv, x)`; `sv_norm` is the precomputed squared norm of `sv`
    fn apply(&self, sv: &FeatureVector, sv_norm: f64, x: &FeatureVector, x_norm: f64) -> f64 {
        let dot = sv.dot(x);
        match *self {
            Kernel::Linear => dot,
            Kernel::Rbf { gamma } => {
                let distance = (sv_norm + x_norm - 2.0 * dot).max(0.0);
                (-gamma * distance).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot + coef0).powi(degree as i32),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot + coef0).tanh(),
        }
    }
}

/// One support vector in sparse form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseRow {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

/// Serialized support vector classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvcSpec {
    /// Class names; `classes[1]` is the positive side of the decision function
    pub classes: Vec<String>,

    pub kernel: Kernel,

    /// Input dimension the support vectors live in
    pub n_features: usize,

    pub support_vectors: Vec<SparseRow>,

    /// Dual coefficient per support vector
    pub dual_coef: Vec<f64>,

    #[serde(default)]
    pub intercept: f64,

    /// Platt scaling slope, `probA_` from scikit-learn as is
    pub prob_a: f64,

    /// Platt scaling offset. `p(classes[1]) = 1 / (1 + exp(prob_a * f + prob_b))`
    /// with `f` positive toward `classes[1]`, so a scikit-learn export stores
    /// `-probB_` here.
    pub prob_b: f64,
}

/// Support vector classifier
#[derive(Debug, Clone)]
pub struct Svc {
    classes: BinaryClasses,
    kernel: Kernel,
    n_features: usize,
    support_vectors: Vec<(FeatureVector, f64)>,
    dual_coef: Vec<f64>,
    intercept: f64,
    prob_a: f64,
    prob_b: f64,
}

impl Svc {
    pub fn from_spec(spec: SvcSpec) -> Result<Self> {
        let classes = BinaryClasses::from_labels(&spec.classes)?;

        if spec.n_features == 0 {
            return Err(Error::artifact("svc n_features must be positive"));
        }
        if spec.support_vectors.is_empty() {
            return Err(Error::artifact("svc has no support vectors"));
        }
        if spec.dual_coef.len() != spec.support_vectors.len() {
            return Err(Error::artifact(format!(
                "svc has {} dual coefficients for {} support vectors",
                spec.dual_coef.len(),
                spec.support_vectors.len()
            )));
        }
        if let Kernel::Poly { degree: 0, .. } = spec.kernel {
            return Err(Error::artifact("polynomial kernel degree must be positive"));
        }
        check_finite("kernel", &spec.kernel.parameters())?;
        check_finite("dual_coef", &spec.dual_coef)?;
        check_finite("svc scalars", &[spec.intercept, spec.prob_a, spec.prob_b])?;

        let mut support_vectors = Vec::with_capacity(spec.support_vectors.len());
        for (i, row) in spec.support_vectors.into_iter().enumerate() {
            check_finite("support_vectors", &row.values)?;
            let sv = FeatureVector::new(spec.n_features, row.indices, row.values)
                .map_err(|e| Error::artifact(format!("support vector {i}: {e}")))?;
            let norm = sv.squared_norm();
            support_vectors.push((sv, norm));
        }

        Ok(Self {
            classes,
            kernel: spec.kernel,
            n_features: spec.n_features,
            support_vectors,
            dual_coef: spec.dual_coef,
            intercept: spec.intercept,
            prob_a: spec.prob_a,
            prob_b: spec.prob_b,
        })
    }

    /// Decision value, positive toward `classes[1]`
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        check_dimension(features, self.n_features)?;
        let x_norm = features.squared_norm();

        let sum: f64 = self
            .support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|((sv, sv_norm), alpha)| {
                alpha * self.kernel.apply(sv, *sv_norm, features, x_norm)
            })
            .sum();

        Ok(sum + self.intercept)
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
}

impl Classifier for Svc {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let f = self.decision_function(features)?;
        // 1 / (1 + exp(A f + B)) == sigmoid(-(A f + B))
        let p_positive = sigmoid(-(self.prob_a * f + self.prob_b));
        self.classes.positive(p_positive).validated()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &str {
        "svc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kernel: Kernel) -> SvcSpec {
        SvcSpec {
            classes: vec!["ham".to_string(), "spam".to_string()],
            kernel,
            n_features: 3,
            support_vectors: vec![
                SparseRow {
                    indices: vec![0],
                    values: vec![1.0],
                },
                SparseRow {
                    indices: vec![2],
                    values: vec![1.0],
                },
            ],
            dual_coef: vec![1.0, -1.0],
            intercept: 0.0,
            prob_a: -2.0,
            prob_b: 0.0,
        }
    }

    fn x(index: usize) -> FeatureVector {
        FeatureVector::new(3, vec![index], vec![1.0]).unwrap()
    }

    #[test]
    fn test_linear_kernel() {
        let svc = Svc::from_spec(spec(Kernel::Linear)).unwrap();
        assert_eq!(svc.decision_function(&x(0)).unwrap(), 1.0);
        assert_eq!(svc.decision_function(&x(2)).unwrap(), -1.0);
        assert_eq!(svc.decision_function(&x(1)).unwrap(), 0.0);

        let probs = svc.predict_proba(&x(0)).unwrap();
        assert!((probs.spam - sigmoid(2.0)).abs() < 1e-12);
        assert!(probs.spam > probs.ham);
    }

    #[test]
    fn test_platt_offset_uses_negated_libsvm_b() {
        let (libsvm_a, libsvm_b) = (-2.0, 0.4);
        let mut s = spec(Kernel::Linear);
        s.prob_a = libsvm_a;
        s.prob_b = -libsvm_b;
        let svc = Svc::from_spec(s).unwrap();

        // libsvm scores classes[0] with the opposite sign of f
        let f = svc.decision_function(&x(0)).unwrap();
        let p_first = 1.0 / (1.0 + (libsvm_a * -f + libsvm_b).exp());

        let probs = svc.predict_proba(&x(0)).unwrap();
        assert!((probs.ham - p_first).abs() < 1e-12);
        assert!((probs.spam - (1.0 - p_first)).abs() < 1e-12);
    }

    #[test]
    fn test_rbf_kernel() {
        let svc = Svc::from_spec(spec(Kernel::Rbf { gamma: 0.5 })).unwrap();
        // exp(0) - exp(-0.5 * 2)
        let expected = 1.0 - (-1.0_f64).exp();
        assert!((svc.decision_function(&x(0)).unwrap() - expected).abs() < 1e-12);
        assert!(svc.decision_function(&x(1)).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_poly_and_sigmoid_kernels() {
        let poly = Svc::from_spec(spec(Kernel::Poly {
            gamma: 1.0,
            coef0: 1.0,
            degree: 2,
        }))
        .unwrap();
        // (1 + 1)^2 - (0 + 1)^2
        assert_eq!(poly.decision_function(&x(0)).unwrap(), 3.0);

        let sig = Svc::from_spec(spec(Kernel::Sigmoid {
            gamma: 1.0,
            coef0: 0.0,
        }))
        .unwrap();
        assert!((sig.decision_function(&x(0)).unwrap() - 1.0_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_deserialization() {
        let kernel: Kernel = serde_json::from_str(r#"{"type": "rbf", "gamma": 0.1}"#).unwrap();
        assert_eq!(kernel, Kernel::Rbf { gamma: 0.1 });
        let kernel: Kernel = serde_json::from_str(r#"{"type": "linear"}"#).unwrap();
        assert_eq!(kernel, Kernel::Linear);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut s = spec(Kernel::Linear);
        s.dual_coef.pop();
        assert!(Svc::from_spec(s).is_err());

        let mut s = spec(Kernel::Linear);
        s.support_vectors[0].indices = vec![7];
        assert!(matches!(Svc::from_spec(s), Err(Error::Artifact(_))));

        let s = spec(Kernel::Rbf { gamma: f64::NAN });
        assert!(Svc::from_spec(s).is_err());

        let s = spec(Kernel::Poly {
            gamma: 1.0,
            coef0: 0.0,
            degree: 0,
        });
        assert!(Svc::from_spec(s).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let svc = Svc::from_spec(spec(Kernel::Linear)).unwrap();
        assert!(matches!(
            svc.predict_proba(&FeatureVector::zeros(4)),
            Err(Error::Transform(_))
        ));
    }
}
