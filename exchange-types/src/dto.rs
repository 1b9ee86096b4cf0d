//! Data Transfer Objects (DTOs) for requests.
//!
//! Responses reuse the domain types directly; the generic error envelope is
//! applied by the HTTP adapter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CryptoCurrency, PageQuery};

/// Request to convert an amount between two catalog currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Source currency symbol
    pub from: CryptoCurrency,
    /// Target currency symbol (must differ from `from`)
    pub to: CryptoCurrency,
    /// Amount of `from` to convert, must be positive
    pub amount: Decimal,
}

/// Filter criteria for the conversion history search.
///
/// Every field is independently optional; absent fields impose no constraint.
/// When both ends of a min/max pair are present no ordering between them is
/// enforced here - an inverted range simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryFilter {
    /// Exact match on the source symbol
    pub from: Option<CryptoCurrency>,
    /// Exact match on the target symbol
    pub to: Option<CryptoCurrency>,

    /// amount >= min
    pub min_amount: Option<Decimal>,
    /// amount <= max
    pub max_amount: Option<Decimal>,

    /// converted_amount >= min
    pub min_converted_amount: Option<Decimal>,
    /// converted_amount <= max
    pub max_converted_amount: Option<Decimal>,

    /// created_at >= from (compared in UTC)
    pub created_at_from: Option<DateTime<Utc>>,
    /// created_at <= to (compared in UTC)
    pub created_at_to: Option<DateTime<Utc>>,

    /// Case-insensitive substring match on the transaction id, treated as a
    /// literal (pattern metacharacters are escaped)
    pub transaction_id_contains: Option<String>,
}

/// Request body for the history search endpoint: an optional filter plus an
/// optional paging block. Both default when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHistoryRequest {
    pub filter: Option<HistoryFilter>,
    pub paging: Option<PageQuery>,
}
