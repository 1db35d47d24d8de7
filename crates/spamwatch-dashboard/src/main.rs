use clap::Parser;
use spamwatch_dashboard::cli::{Cli, Commands};
use spamwatch_dashboard::client::ApiClient;
use spamwatch_dashboard::examples::{classify_examples, ExampleRow};
use spamwatch_dashboard::server::run_server;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            port,
            address,
            api_url,
            verbose,
        } => {
            init_logging(verbose);

            let client = ApiClient::new(api_url)?;
            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  SpamWatch dashboard");
            println!();
            println!("  API:     {}", client.base_url());
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(client, addr).await?;
        }

        Commands::Check { api_url, verbose } => {
            init_logging(verbose);

            let client = ApiClient::new(api_url)?;
            match client.health().await.ok() {
                Some(health) => println!(
                    "API {} ({}, model loaded: {})",
                    client.base_url(),
                    health.status,
                    health.model_loaded
                ),
                None => println!("API {} is not reachable", client.base_url()),
            }
            println!();

            for row in classify_examples(&client).await {
                match row {
                    ExampleRow::Classified {
                        message,
                        verdict,
                        spam_probability,
                        ham_probability,
                        ..
                    } => println!(
                        "{:<55} {:<9} spam {:>7}  ham {:>7}",
                        message, verdict, spam_probability, ham_probability
                    ),
                    ExampleRow::Failed { message, error } => {
                        println!("{:<55} error: {}", message, error)
                    }
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "spamwatch_dashboard=debug,tower_http=debug"
    } else {
        "spamwatch_dashboard=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
