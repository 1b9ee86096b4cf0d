//! Port traits implemented by adapters.

mod gateway;
mod repository;

pub use gateway::{GatewayError, QuoteGateway};
pub use repository::ConversionRepository;
