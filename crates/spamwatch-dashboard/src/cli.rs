use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spamwatch-dashboard")]
#[command(author, version, about = "SpamWatch spam classifier dashboard")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server with web UI
    Start {
        /// Listen port
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Base URL of the prediction API
        #[arg(long, env = "SPAMWATCH_API_URL", default_value = "http://localhost:8000")]
        api_url: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify the example messages once and print the results
    Check {
        /// Base URL of the prediction API
        #[arg(long, env = "SPAMWATCH_API_URL", default_value = "http://localhost:8000")]
        api_url: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
