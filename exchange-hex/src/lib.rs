//! # Exchange Hex
//!
//! Application service layer and HTTP adapter for the exchange service.
//!
//! ## Architecture
//!
//! - `service` - Application service (conversion orchestration, history search)
//! - `resilience` - Rate limiter / retry / circuit breaker around upstream calls
//! - `history_cache` - Memoized history search results
//! - `inbound` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: ConversionRepository` and
//! `G: QuoteGateway`, allowing different adapters to be injected.

pub mod history_cache;
pub mod inbound;
pub mod resilience;
pub mod service;


pub use service::ExchangeService;
