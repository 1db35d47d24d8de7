//! TF-IDF vectorization over a vocabulary fixed at training time
//!
//! The vectorizer re-analyzes the normalized text the same way the fitted
//! vectorizer did during training: optional lowercasing, a token regex, word
//! n-grams, term frequencies weighted by inverse document frequency, then
//! row normalization. Terms outside the vocabulary are ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use spamwatch_core::{Error, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default token pattern: runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Sparse feature vector with sorted, unique indices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build from parallel index/value arrays.
    ///
    /// Indices must be strictly increasing and below `dim`.
    pub fn new(dim: usize, indices: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::transform(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        if indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::transform("feature indices are not strictly increasing"));
        }
        if let Some(&last) = indices.last() {
            if last >= dim {
                return Err(Error::transform(format!(
                    "feature index {last} out of range for dimension {dim}"
                )));
            }
        }
        Ok(Self {
            dim,
            indices,
            values,
        })
    }

    /// All-zero vector of the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight row
    pub fn dot_dense(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim {
            return Err(Error::transform(format!(
                "expected {} weights, got {}",
                self.dim,
                weights.len()
            )));
        }
        Ok(self.iter().map(|(i, v)| v * weights[i]).sum())
    }

    /// Dot product with another sparse vector of the same dimension
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Squared euclidean norm
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Term to column mapping
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column; absent when IDF was disabled
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    /// Smallest and largest word n-gram length
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub norm: Norm,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Use presence instead of counts
    #[serde(default)]
    pub binary: bool,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    norm: Norm,
    sublinear_tf: bool,
    binary: bool,
    lowercase: bool,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Validate a serialized vectorizer and compile its token pattern
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        let dim = spec.vocabulary.len();
        if dim == 0 {
            return Err(Error::artifact("vectorizer vocabulary is empty"));
        }

        let mut seen = HashSet::with_capacity(dim);
        for (term, &column) in &spec.vocabulary {
            if column >= dim {
                return Err(Error::artifact(format!(
                    "vocabulary term '{term}' maps to column {column}, outside 0..{dim}"
                )));
            }
            if !seen.insert(column) {
                return Err(Error::artifact(format!(
                    "vocabulary column {column} is assigned more than once"
                )));
            }
        }

        if let Some(idf) = &spec.idf {
            if idf.len() != dim {
                return Err(Error::artifact(format!(
                    "idf has {} entries for a vocabulary of {dim}",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(Error::artifact("idf contains non-finite weights"));
            }
        }

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = Regex::new(&spec.token_pattern).map_err(|e| {
            Error::artifact(format!("invalid token pattern '{}': {e}", spec.token_pattern))
        })?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            ngram_range: spec.ngram_range,
            norm: spec.norm,
            sublinear_tf: spec.sublinear_tf,
            binary: spec.binary,
            lowercase: spec.lowercase,
            token_pattern,
        })
    }

    /// Output dimension (vocabulary size)
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of a vocabulary term
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Transform normalized text into a TF-IDF weighted feature vector
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut indices = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (column, count) in counts {
            let tf = if self.binary {
                1.0
            } else if self.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };
            let weight = match &self.idf {
                Some(idf) => tf * idf[column],
                None => tf,
            };
            indices.push(column);
            values.push(weight);
        }

        normalize_row(&mut values, self.norm);

        FeatureVector {
            dim: self.dim(),
            indices,
            values,
        }
    }

    /// Split text into vocabulary terms (tokens and their n-grams)
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens.into_iter().map(str::to_string).collect();
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

fn normalize_row(values: &mut [f64], norm: Norm) {
    let total = match norm {
        Norm::L2 => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
        Norm::L1 => values.iter().map(|v| v.abs()).sum::<f64>(),
        Norm::None => return,
    };
    if total > 0.0 {
        for v in values.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(terms: &[&str]) -> VectorizerSpec {
        VectorizerSpec {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: None,
            ngram_range: (1, 1),
            norm: Norm::None,
            sublinear_tf: false,
            binary: false,
            lowercase: true,
            token_pattern: default_token_pattern(),
        }
    }

    #[test]
    fn test_counts_without_idf() {
        let vectorizer = TfidfVectorizer::from_spec(spec(&["free", "prize", "lunch"])).unwrap();
        let vector = vectorizer.transform("free prize free");

        assert_eq!(vector.dim(), 3);
        assert_eq!(vector.indices(), &[0, 1]);
        assert_eq!(vector.values(), &[2.0, 1.0]);
    }

    #[test]
    fn test_idf_and_l2_norm() {
        let mut s = spec(&["free", "prize"]);
        s.idf = Some(vec![1.0, 2.0]);
        s.norm = Norm::L2;
        let vectorizer = TfidfVectorizer::from_spec(s).unwrap();

        let vector = vectorizer.transform("free prize");
        let norm = 5.0_f64.sqrt();
        assert!((vector.values()[0] - 1.0 / norm).abs() < 1e-12);
        assert!((vector.values()[1] - 2.0 / norm).abs() < 1e-12);
        assert!((vector.squared_norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_and_binary_tf() {
        let mut s = spec(&["free"]);
        s.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_spec(s).unwrap();
        let vector = vectorizer.transform("free free free");
        assert!((vector.values()[0] - (1.0 + 3.0_f64.ln())).abs() < 1e-12);

        let mut s = spec(&["free"]);
        s.binary = true;
        let vectorizer = TfidfVectorizer::from_spec(s).unwrap();
        assert_eq!(vectorizer.transform("free free").values(), &[1.0]);
    }

    #[test]
    fn test_out_of_vocabulary_terms_are_ignored() {
        let vectorizer = TfidfVectorizer::from_spec(spec(&["free", "prize"])).unwrap();
        let vector = vectorizer.transform("zebra quantum xylophon");
        assert_eq!(vector.dim(), 2);
        assert!(vector.is_zero());
        assert_eq!(vector.nnz(), 0);
    }

    #[test]
    fn test_empty_text_yields_zero_vector() {
        let mut s = spec(&["free"]);
        s.norm = Norm::L2;
        let vectorizer = TfidfVectorizer::from_spec(s).unwrap();
        let vector = vectorizer.transform("");
        assert!(vector.is_zero());
        assert_eq!(vector, FeatureVector::zeros(1));
    }

    #[test]
    fn test_token_pattern_drops_short_and_punctuation_tokens() {
        let vectorizer = TfidfVectorizer::from_spec(spec(&["ve", "n"])).unwrap();
        let vector = vectorizer.transform("'ve n't");
        assert_eq!(vector.indices(), &[0]);
    }

    #[test]
    fn test_bigrams() {
        let mut s = spec(&["free", "free prize", "prize"]);
        s.ngram_range = (1, 2);
        let vectorizer = TfidfVectorizer::from_spec(s).unwrap();
        let vector = vectorizer.transform("free prize");
        assert_eq!(vector.indices(), &[0, 1, 2]);
        assert_eq!(vector.values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        let mut s = spec(&["free", "prize"]);
        s.vocabulary.insert("prize".to_string(), 5);
        assert!(matches!(TfidfVectorizer::from_spec(s), Err(Error::Artifact(_))));

        let mut s = spec(&["free", "prize"]);
        s.vocabulary.insert("prize".to_string(), 0);
        assert!(TfidfVectorizer::from_spec(s).is_err());

        let mut s = spec(&["free"]);
        s.idf = Some(vec![1.0, 2.0]);
        assert!(TfidfVectorizer::from_spec(s).is_err());

        let mut s = spec(&["free"]);
        s.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_spec(s).is_err());

        let mut s = spec(&["free"]);
        s.token_pattern = "(".to_string();
        assert!(TfidfVectorizer::from_spec(s).is_err());

        assert!(TfidfVectorizer::from_spec(spec(&[])).is_err());
    }

    #[test]
    fn test_feature_vector_validation() {
        assert!(FeatureVector::new(3, vec![0, 2], vec![1.0, 1.0]).is_ok());
        assert!(FeatureVector::new(3, vec![2, 0], vec![1.0, 1.0]).is_err());
        assert!(FeatureVector::new(3, vec![3], vec![1.0]).is_err());
        assert!(FeatureVector::new(3, vec![0], vec![]).is_err());
    }

    #[test]
    fn test_sparse_dot_products() {
        let a = FeatureVector::new(4, vec![0, 2], vec![1.0, 2.0]).unwrap();
        let b = FeatureVector::new(4, vec![2, 3], vec![3.0, 4.0]).unwrap();
        assert_eq!(a.dot(&b), 6.0);
        assert_eq!(a.dot_dense(&[1.0, 1.0, 1.0, 1.0]).unwrap(), 3.0);
        assert!(a.dot_dense(&[1.0]).is_err());
    }
}
