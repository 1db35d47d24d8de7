//! Text normalization
//!
//! Maps raw message text to the canonical token sequence the vectorizer was
//! fitted on: lowercase, whitespace collapse, word tokenization, removal of
//! short tokens and stop words, Porter stemming. Token order and duplicates
//! are preserved.

use crate::stemmer::PorterStemmer;
use crate::stopwords::StopWords;
use crate::tokenizer::word_tokenize;
use std::fmt;

/// Tokens of this many characters or fewer are discarded.
pub const MAX_DISCARDED_TOKEN_LEN: usize = 2;

/// Ordered sequence of canonical stems produced for one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Space-joined form fed to the vectorizer
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

/// Deterministic text normalizer
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    stop_words: StopWords,
    stemmer: PorterStemmer,
}

impl TextNormalizer {
    /// Normalizer with the English stop-word set and Porter stemming
    pub fn new() -> Self {
        Self {
            stop_words: StopWords::english(),
            stemmer: PorterStemmer::new(),
        }
    }

    /// Normalize raw text into canonical stems
    pub fn normalize(&self, raw: &str) -> TokenSequence {
        let cleaned = clean_text(raw);
        if cleaned.is_empty() {
            return TokenSequence::default();
        }

        let tokens = word_tokenize(&cleaned)
            .into_iter()
            .filter(|token| token.chars().count() > MAX_DISCARDED_TOKEN_LEN)
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.stemmer.stem(token))
            .collect();

        TokenSequence { tokens }
    }

    /// Normalize text that may be absent; absent text is empty
    pub fn normalize_opt(&self, raw: Option<&str>) -> TokenSequence {
        self.normalize(raw.unwrap_or_default())
    }
}

/// Lowercase and collapse whitespace runs to single spaces.
fn clean_text(raw: &str) -> String {
    let lower = raw.to_lowercase();
    lower.split_whitespace().collect::<Vec<_>>().join(" ")
}
