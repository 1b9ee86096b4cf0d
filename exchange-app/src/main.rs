//! # Exchange Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository and quote gateway adapters
//! - Create the exchange service with its resilience/cache policies
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_hex::history_cache::HistoryCache;
use exchange_hex::resilience::ResilienceEnvelope;
use exchange_hex::{ExchangeService, inbound::HttpServer};
use exchange_quotes::HttpQuoteGateway;
use exchange_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,exchange_app=debug,exchange_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting exchange server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Build the upstream quote gateway
    let mut gateway = HttpQuoteGateway::new(&config.quote_base_url);
    if let Some(api_key) = &config.quote_api_key {
        gateway = gateway.with_api_key(api_key);
    } else {
        tracing::warn!("QUOTE_API_KEY not set, upstream calls will be unauthenticated");
    }

    // Create the exchange service
    let service = ExchangeService::with_policies(
        repo,
        gateway,
        ResilienceEnvelope::new(config.envelope.clone()),
        HistoryCache::new(config.cache_flush_interval),
    );

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
