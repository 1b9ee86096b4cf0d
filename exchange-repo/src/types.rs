//! Database row types and their mapping into domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use exchange_types::{ConversionId, ConversionRecord, CryptoCurrency, RepoError};

/// Serializes a timestamp as fixed-width RFC 3339 UTC (microseconds, `Z`
/// suffix) so that string comparison in SQL matches temporal comparison.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Corrupt(format!("invalid timestamp '{}': {}", s, e)))
}

/// Encodes a decimal as a fixed-width zero-padded string so that
/// lexicographic order equals numeric order, keeping range predicates exact
/// past f64 precision. Amounts are positive by invariant; the encoding does
/// not support negative values.
pub(crate) fn encode_decimal(value: &Decimal) -> String {
    let text = value.normalize().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!("{:0>29}.{:0<28}", int_part, frac_part)
}

fn parse_decimal(s: &str, field: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(s)
        .map(|d| d.normalize())
        .map_err(|e| RepoError::Corrupt(format!("invalid {} '{}': {}", field, s, e)))
}

/// Raw conversion row.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DbConversionRow {
    pub id: String,
    pub transaction_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: String,
    pub converted_amount: String,
    pub created_at: String,
}

impl DbConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepoError::Corrupt(format!("invalid id '{}': {}", self.id, e)))?;

        let from_currency = CryptoCurrency::from_str(&self.from_currency)
            .map_err(RepoError::Corrupt)?;
        let to_currency = CryptoCurrency::from_str(&self.to_currency).map_err(RepoError::Corrupt)?;

        let amount = parse_decimal(&self.amount, "amount")?;
        let converted_amount = parse_decimal(&self.converted_amount, "converted amount")?;

        let created_at = parse_timestamp(&self.created_at)?;

        Ok(ConversionRecord {
            id: ConversionId::from_uuid(id),
            transaction_id: self.transaction_id,
            from_currency,
            to_currency,
            amount,
            converted_amount,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let parsed = parse_timestamp(&format_timestamp(&now)).unwrap();
        // Storage precision is microseconds.
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let a = format_timestamp(&Utc::now());
        assert_eq!(a.len(), "2024-01-01T00:00:00.000000Z".len());
        assert!(a.ends_with('Z'));
    }

    #[test]
    fn test_decimal_encoding_orders_lexicographically() {
        use rust_decimal_macros::dec;

        let values = [dec!(0.5), dec!(2.5), dec!(10), dec!(2711598539.488985400)];
        for pair in values.windows(2) {
            assert!(encode_decimal(&pair[0]) < encode_decimal(&pair[1]));
        }
    }

    #[test]
    fn test_decimal_encoding_ignores_scale() {
        use rust_decimal_macros::dec;

        assert_eq!(encode_decimal(&dec!(2.50)), encode_decimal(&dec!(2.5)));
        assert_eq!(encode_decimal(&dec!(2500)), encode_decimal(&dec!(2500.000)));
    }

    #[test]
    fn test_decimal_encoding_round_trips() {
        use rust_decimal_macros::dec;

        let value = dec!(2711598539.488985400);
        let parsed = parse_decimal(&encode_decimal(&value), "amount").unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_corrupt_currency_is_rejected() {
        let row = DbConversionRow {
            id: Uuid::new_v4().to_string(),
            transaction_id: "tx".into(),
            from_currency: "NOPE".into(),
            to_currency: "ETH".into(),
            amount: "1".into(),
            converted_amount: "2".into(),
            created_at: format_timestamp(&Utc::now()),
        };

        assert!(matches!(row.into_domain(), Err(RepoError::Corrupt(_))));
    }
}
