use std::net::SocketAddr;

use nba_stats_gateway::{app, config::Config, provider::StatsClient, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting stats gateway...");

    let config = Config::from_env().expect("Invalid configuration");

    let stats = StatsClient::new(&config.stats_base_url, config.stats_timeout, &config.season)
        .expect("Failed to build stats client");

    tracing::info!(
        "Using stats provider at {} for season {}",
        config.stats_base_url,
        config.season
    );

    let addr = SocketAddr::from((config.host, config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(AppState::new(stats)))
        .await
        .expect("Failed to start server.");
}
