use catalogue_addon::{Config, serve};
use clap::Parser;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogue_addon=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Exits with a usage message if the API key is missing
    let config = Config::parse();

    if let Err(e) = serve(&config).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
