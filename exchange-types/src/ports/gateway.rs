//! Upstream quote gateway port.
//!
//! A thin interface over the external price-quote/catalog provider. The
//! gateway itself performs no retries and no caching - the resilience
//! envelope and cache are layered on top by the application service.

use crate::domain::CryptoCurrency;
use crate::upstream::{PriceConversion, SymbolMap};

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Upstream request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("Upstream returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The response body could not be decoded.
    #[error("Failed to decode upstream payload: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether a retry has a chance of succeeding. Transport failures and
    /// server-side/throttling statuses are transient; malformed payloads and
    /// client errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Request(_) => true,
            GatewayError::HttpStatus { status } => *status >= 500 || *status == 429,
            GatewayError::Decode(_) => false,
        }
    }
}

/// Port trait for the upstream quote provider.
#[async_trait::async_trait]
pub trait QuoteGateway: Send + Sync + 'static {
    /// Quotes `amount` units of `from` expressed in `to`.
    ///
    /// `amount` is a canonical decimal string with trailing zeros stripped.
    /// The raw response is returned unvalidated; the orchestrator owns the
    /// stage-by-stage validation.
    async fn price_conversion(
        &self,
        amount: &str,
        from: CryptoCurrency,
        to: CryptoCurrency,
    ) -> Result<PriceConversion, GatewayError>;

    /// Lists a slice of the upstream symbol catalog. `start` is a 1-based
    /// offset into the catalog ordered by `sort`.
    async fn symbol_map(&self, start: u32, limit: u32, sort: &str)
    -> Result<SymbolMap, GatewayError>;
}

/// Shared-handle delegation, so callers can keep a handle to an adapter they
/// hand to the service.
#[async_trait::async_trait]
impl<T: QuoteGateway> QuoteGateway for std::sync::Arc<T> {
    async fn price_conversion(
        &self,
        amount: &str,
        from: CryptoCurrency,
        to: CryptoCurrency,
    ) -> Result<PriceConversion, GatewayError> {
        (**self).price_conversion(amount, from, to).await
    }

    async fn symbol_map(
        &self,
        start: u32,
        limit: u32,
        sort: &str,
    ) -> Result<SymbolMap, GatewayError> {
        (**self).symbol_map(start, limit, sort).await
    }
}
