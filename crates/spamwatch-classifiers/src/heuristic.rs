//! Keyword heuristic used while no model is loaded

use aho_corasick::AhoCorasick;
use spamwatch_core::{Error, PredictionResult, Result};
use std::collections::HashSet;

/// Keywords checked by default
pub const DEFAULT_SPAM_KEYWORDS: &[&str] = &[
    "win",
    "free",
    "prize",
    "congratulations",
    "claim",
    "money",
    "cash",
    "award",
];

/// Score added per distinct keyword found
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Upper bound on the heuristic score
pub const MAX_HEURISTIC_SCORE: f64 = 0.9;

/// Substring keyword counter.
///
/// Each keyword counts at most once however often it appears, and matches
/// inside longer words count (`"winner"` contains `"win"`).
#[derive(Debug, Clone)]
pub struct KeywordHeuristic {
    keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl KeywordHeuristic {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();

        let matcher = AhoCorasick::new(&keywords)
            .map_err(|e| Error::config(format!("failed to build keyword matcher: {e}")))?;

        Ok(Self { keywords, matcher })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Number of distinct keywords present in the text
    pub fn hits(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        let found: HashSet<usize> = self
            .matcher
            .find_overlapping_iter(&lower)
            .map(|m| m.pattern().as_usize())
            .collect();
        found.len()
    }

    /// Spam score in `[0, MAX_HEURISTIC_SCORE]`
    pub fn score(&self, text: &str) -> f64 {
        (self.hits(text) as f64 * KEYWORD_WEIGHT).min(MAX_HEURISTIC_SCORE)
    }

    pub fn classify(&self, text: &str) -> PredictionResult {
        PredictionResult::from_heuristic_score(self.score(text))
    }
}

impl Default for KeywordHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_SPAM_KEYWORDS).expect("default keywords form a valid matcher")
    }
}
