//! Conversion history domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::CryptoCurrency;

/// Unique storage identifier for a ConversionRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionId(Uuid);

impl ConversionId {
    /// Creates a new random ConversionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConversionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConversionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConversionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A persisted currency conversion.
///
/// Records are immutable once created - they are an append-only history of
/// what the upstream quoted at the time. `converted_amount` is never
/// recomputed after persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Storage identifier
    pub id: ConversionId,
    /// Externally visible transaction identifier (random UUID string, not
    /// guaranteed equal to the storage id)
    pub transaction_id: String,
    /// Source currency symbol
    pub from_currency: CryptoCurrency,
    /// Target currency symbol
    pub to_currency: CryptoCurrency,
    /// Input amount (> 0)
    pub amount: Decimal,
    /// amount x unit price at creation time
    pub converted_amount: Decimal,
    /// Assigned once at first persistence, never overwritten
    pub created_at: DateTime<Utc>,
}

/// A conversion about to be persisted.
///
/// `transaction_id` and `created_at` stay optional until persistence;
/// [`NewConversion::assign_defaults_if_absent`] backfills whichever is still
/// unset. Repositories call it immediately before the insert.
#[derive(Debug, Clone)]
pub struct NewConversion {
    pub transaction_id: Option<String>,
    pub from_currency: CryptoCurrency,
    pub to_currency: CryptoCurrency,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewConversion {
    pub fn new(
        from_currency: CryptoCurrency,
        to_currency: CryptoCurrency,
        amount: Decimal,
        converted_amount: Decimal,
    ) -> Self {
        Self {
            transaction_id: None,
            from_currency,
            to_currency,
            amount,
            converted_amount,
            created_at: None,
        }
    }

    /// Sets the externally visible transaction identifier.
    pub fn with_transaction_id(mut self, transaction_id: String) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    /// Assigns a random transaction id and the current UTC timestamp, but
    /// only to fields that are still unset. Idempotent.
    pub fn assign_defaults_if_absent(&mut self) {
        if self
            .transaction_id
            .as_ref()
            .map(|id| id.is_empty())
            .unwrap_or(true)
        {
            self.transaction_id = Some(Uuid::new_v4().to_string());
        }
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_conversion() -> NewConversion {
        NewConversion::new(
            CryptoCurrency::BTC,
            CryptoCurrency::ARB,
            dec!(2.5),
            dec!(2500),
        )
    }

    #[test]
    fn test_defaults_assigned_when_absent() {
        let mut record = new_conversion();
        record.assign_defaults_if_absent();

        let tx_id = record.transaction_id.unwrap();
        assert!(Uuid::parse_str(&tx_id).is_ok());
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_defaults_preserve_existing_values() {
        let mut record = new_conversion().with_transaction_id("fixed-tx".to_string());
        let stamped = Utc::now();
        record.created_at = Some(stamped);

        record.assign_defaults_if_absent();

        assert_eq!(record.transaction_id.as_deref(), Some("fixed-tx"));
        assert_eq!(record.created_at, Some(stamped));
    }

    #[test]
    fn test_empty_transaction_id_is_replaced() {
        let mut record = new_conversion().with_transaction_id(String::new());
        record.assign_defaults_if_absent();

        assert!(!record.transaction_id.unwrap().is_empty());
    }
}
