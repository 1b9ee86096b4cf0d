//! # Exchange Types
//!
//! Domain types and port traits for the crypto exchange service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CryptoCurrency, ConversionRecord, paging)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `upstream/` - Wire models of the upstream quote provider payloads
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod upstream;

// Re-export commonly used types
pub use domain::{
    ConversionId, ConversionRecord, CryptoCurrency, CurrencySymbolEntry, NewConversion, PageQuery,
    PageResult, SortDirection, SortOrder,
};
pub use dto::{ConvertRequest, HistoryFilter, SearchHistoryRequest};
pub use error::{AppError, RepoError};
pub use ports::{ConversionRepository, GatewayError, QuoteGateway};
pub use upstream::{ConversionData, PriceConversion, Quote, SymbolMap, SymbolMapItem, UpstreamStatus};
