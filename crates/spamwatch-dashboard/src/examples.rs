//! Fixed example messages shown on the dashboard

use crate::client::{ApiClient, ApiReply};
use futures::future::join_all;
use serde::Serialize;
use spamwatch_core::PredictionResult;

/// Messages classified on the examples tab
pub const EXAMPLE_MESSAGES: &[&str] = &[
    "Free entry in 2 a wkly comp to win FA Cup final tkts",
    "Hey, are we still meeting for lunch tomorrow?",
    "Congratulations! You've won a $1000 gift card. Click here to claim.",
    "Ok, see you later then",
    "URGENT: Your bank account has been suspended. Verify your details now.",
];

/// Characters of a message shown before truncation
pub const PREVIEW_CHARS: usize = 50;

/// One row of the examples table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExampleRow {
    Classified {
        message: String,
        verdict: &'static str,
        spam_probability: String,
        ham_probability: String,
        is_spam: bool,
    },
    Failed {
        message: String,
        error: String,
    },
}

impl ExampleRow {
    pub fn from_reply(message: &str, reply: ApiReply<PredictionResult>) -> Self {
        let message = preview(message);
        match reply {
            ApiReply::Ok(result) => Self::Classified {
                message,
                verdict: if result.is_spam { "Spam" } else { "Not spam" },
                spam_probability: percent(result.spam_probability),
                ham_probability: percent(result.ham_probability),
                is_spam: result.is_spam,
            },
            ApiReply::Failed { error } => Self::Failed { message, error },
        }
    }
}

/// First `PREVIEW_CHARS` characters followed by `...` when longer
pub fn preview(message: &str) -> String {
    if message.chars().count() > PREVIEW_CHARS {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

/// Probability as a percentage with two decimals
pub fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Classify every example concurrently, keeping the table order
pub async fn classify_examples(client: &ApiClient) -> Vec<ExampleRow> {
    let replies = join_all(EXAMPLE_MESSAGES.iter().map(|msg| client.predict(msg))).await;
    EXAMPLE_MESSAGES
        .iter()
        .zip(replies)
        .map(|(msg, reply)| ExampleRow::from_reply(msg, reply))
        .collect()
}
