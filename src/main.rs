use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_haven::{config, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_haven=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = config::Config::from_env();

    // --port overrides PORT
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--port") {
        match args.get(pos + 1).and_then(|v| v.parse().ok()) {
            Some(port) => config.port = port,
            None => tracing::warn!("Ignoring --port without a valid port number"),
        }
    }

    if let Err(e) = server::start_server(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
