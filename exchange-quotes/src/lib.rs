//! # Exchange Quotes
//!
//! Typed reqwest adapter for the upstream quote provider (a
//! CoinMarketCap-style API). Implements the [`QuoteGateway`] port.
//!
//! The gateway is deliberately thin: one request per call, a hard request
//! timeout, and no retries or caching. Resilience is layered on by the
//! application service.

use std::time::Duration;

use exchange_types::upstream::{PriceConversion, SymbolMap};
use exchange_types::{CryptoCurrency, GatewayError, QuoteGateway};
use serde::de::DeserializeOwned;

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the upstream quote provider.
pub struct HttpQuoteGateway {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl HttpQuoteGateway {
    /// Creates a new gateway with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new gateway with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Sets the provider API key, sent on every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let mut req = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path, "upstream returned error status");
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl QuoteGateway for HttpQuoteGateway {
    async fn price_conversion(
        &self,
        amount: &str,
        from: CryptoCurrency,
        to: CryptoCurrency,
    ) -> Result<PriceConversion, GatewayError> {
        self.get(
            "/v1/tools/price-conversion",
            &[
                ("amount", amount.to_string()),
                ("symbol", from.code().to_string()),
                ("convert", to.code().to_string()),
            ],
        )
        .await
    }

    async fn symbol_map(
        &self,
        start: u32,
        limit: u32,
        sort: &str,
    ) -> Result<SymbolMap, GatewayError> {
        self.get(
            "/v1/cryptocurrency/map",
            &[
                ("listing_status", "active".to_string()),
                ("start", start.to_string()),
                ("limit", limit.to_string()),
                ("sort", sort.to_string()),
            ],
        )
        .await
    }
}
