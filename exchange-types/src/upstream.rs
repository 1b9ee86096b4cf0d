//! Wire models for the upstream quote provider.
//!
//! Every field the provider may omit is optional here; the conversion
//! orchestrator validates presence stage by stage and turns each violation
//! into a distinct failure reason. Unknown fields are ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The status block every upstream response carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamStatus {
    pub timestamp: Option<String>,
    pub error_code: i64,
    pub error_message: Option<String>,
}

/// Response of the price-conversion endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceConversion {
    pub status: Option<UpstreamStatus>,
    pub data: Option<ConversionData>,
}

/// The data payload of a price conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionData {
    pub id: Option<i64>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub last_updated: Option<String>,
    /// Quotes keyed by target symbol code
    pub quote: Option<HashMap<String, Quote>>,
}

/// A single quote entry: the unit price of the requested base expressed in
/// the keyed target currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    pub price: Option<Decimal>,
    pub last_updated: Option<String>,
}

/// Response of the cryptocurrency map (catalog) endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolMap {
    pub status: Option<UpstreamStatus>,
    pub data: Option<Vec<SymbolMapItem>>,
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolMapItem {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<i32>,
}
