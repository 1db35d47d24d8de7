//! SpamWatch Classifiers
//!
//! Spam/ham classification of short text messages with pre-trained models.
//!
//! A message goes through three stages:
//! - Normalization: lowercase, tokenize, drop short tokens and stop words,
//!   Porter-stem the rest
//! - Vectorization: TF-IDF over the vocabulary fixed at training time
//! - Classification: multinomial naive Bayes, logistic regression or a
//!   kernel SVC producing spam/ham probabilities
//!
//! The stages are loaded from a JSON or YAML artifact. When no artifact is
//! available, [`SpamClassifier`] answers with a keyword heuristic instead.

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod heuristic;
pub mod logistic;
pub mod naive_bayes;
pub mod normalizer;
pub mod pipeline;
pub mod service;
pub mod stemmer;
pub mod stopwords;
pub mod svc;
pub mod tokenizer;
pub mod vectorizer;

pub use artifact::{ArtifactMetadata, ModelArtifact};
pub use classifier::{BinaryClasses, ClassProbabilities, Classifier, ClassifierSpec};
pub use config::{ClassifierConfig, FallbackConfig, DEFAULT_MODEL_PATH};
pub use heuristic::KeywordHeuristic;
pub use logistic::{LogisticRegression, LogisticRegressionSpec};
pub use naive_bayes::{MultinomialNb, NaiveBayesSpec};
pub use normalizer::{TextNormalizer, TokenSequence};
pub use pipeline::InferencePipeline;
pub use service::{ModelInfo, SpamClassifier};
pub use svc::{Kernel, SparseRow, Svc, SvcSpec};
pub use vectorizer::{FeatureVector, Norm, TfidfVectorizer, VectorizerSpec};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassProbabilities, Classifier};
    pub use crate::config::ClassifierConfig;
    pub use crate::normalizer::TextNormalizer;
    pub use crate::pipeline::InferencePipeline;
    pub use crate::service::SpamClassifier;
    pub use crate::vectorizer::FeatureVector;
}
