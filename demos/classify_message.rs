//! Classify messages from the command line with the bundled model
//!
//! ```text
//! cargo run -p spamwatch-classifiers --example classify_message -- "Free entry in 2 a wkly comp"
//! ```

use spamwatch_classifiers::{ClassifierConfig, SpamClassifier, TextNormalizer};

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut config = ClassifierConfig::default();
    if let Ok(path) = std::env::var("SPAMWATCH_MODEL") {
        config.model_path = path.into();
    }
    let classifier = SpamClassifier::load(&config);
    let normalizer = TextNormalizer::new();

    let messages: Vec<String> = std::env::args().skip(1).collect();
    let messages = if messages.is_empty() {
        vec![
            "Hey, are we still meeting for lunch tomorrow?".to_string(),
            "Congratulations! You've won a $1000 gift card. Click here to claim.".to_string(),
        ]
    } else {
        messages
    };

    println!("mode: {}", classifier.mode().as_str());
    for message in &messages {
        let result = classifier.classify(message);
        println!("\n{message}");
        println!("  tokens: {}", normalizer.normalize(message));
        println!(
            "  {} (spam {:.1}%, ham {:.1}%)",
            result.label,
            result.spam_probability * 100.0,
            result.ham_probability * 100.0
        );
    }
}
