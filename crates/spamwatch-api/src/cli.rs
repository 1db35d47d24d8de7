use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "spamwatch-api")]
#[command(author, version, about = "SpamWatch spam classification API", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SPAMWATCH_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Model artifact path (overrides classifier.model_path)
    #[arg(short, long, env = "SPAMWATCH_MODEL")]
    pub model: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, env = "SPAMWATCH_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SPAMWATCH_PORT")]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
