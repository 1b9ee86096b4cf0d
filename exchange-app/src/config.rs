//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use exchange_hex::resilience::{CircuitBreakerConfig, EnvelopeConfig, RetryPolicy};

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub quote_base_url: String,
    pub quote_api_key: Option<String>,
    pub envelope: EnvelopeConfig,
    pub cache_flush_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let quote_base_url = env::var("QUOTE_BASE_URL")
            .unwrap_or_else(|_| "https://pro-api.coinmarketcap.com".to_string());
        let quote_api_key = env::var("QUOTE_API_KEY").ok();

        let envelope = EnvelopeConfig {
            requests_per_period: parse_or("UPSTREAM_REQUESTS_PER_MINUTE", 100)?,
            period: Duration::from_secs(60),
            retry: RetryPolicy {
                max_attempts: parse_or("UPSTREAM_RETRY_MAX_ATTEMPTS", 3)?,
                base_delay: Duration::from_millis(parse_or("UPSTREAM_RETRY_BASE_DELAY_MS", 200)?),
            },
            breaker: CircuitBreakerConfig {
                failure_rate_threshold: parse_or("BREAKER_FAILURE_RATE", 0.5)?,
                min_calls: parse_or("BREAKER_MIN_CALLS", 10)?,
                window_size: parse_or("BREAKER_WINDOW_SIZE", 20)?,
                cooldown: Duration::from_secs(parse_or("BREAKER_COOLDOWN_SECS", 30)?),
            },
        };

        let cache_flush_interval =
            Duration::from_secs(parse_or("HISTORY_CACHE_FLUSH_SECS", 600)?);

        Ok(Self {
            port,
            database_url,
            quote_base_url,
            quote_api_key,
            envelope,
            cache_flush_interval,
        })
    }
}

fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
