//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use exchange_types::{
    ConversionId, ConversionRecord, ConversionRepository, HistoryFilter, NewConversion, PageQuery,
    RepoError, SortDirection, SortOrder,
};

use crate::types::{DbConversionRow, encode_decimal, format_timestamp};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteConversionRepo {
    pool: SqlitePool,
}

impl SqliteConversionRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory SQLite database exists per connection, so the pool must
        // not hand out a second connection that never saw the migration.
        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            pool_options = pool_options.max_connections(1);
        }
        let pool = pool_options.connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_conversions.sql");
        sqlx::raw_sql(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Criteria translation
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes LIKE metacharacters so the token matches literally.
fn escape_like(token: &str) -> String {
    token
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Appends one ANDed predicate per non-null filter field.
fn push_predicates(qb: &mut QueryBuilder<'_, Sqlite>, filter: Option<&HistoryFilter>) {
    let Some(f) = filter else { return };

    // Anchor clause so every predicate below can push " AND ...".
    qb.push(" WHERE 1 = 1");

    // Symbols are stored as their canonical string code.
    if let Some(from) = f.from {
        qb.push(" AND from_currency = ").push_bind(from.code());
    }
    if let Some(to) = f.to {
        qb.push(" AND to_currency = ").push_bind(to.code());
    }

    // Amounts are stored fixed-width, so string comparison is exact numeric
    // comparison, with no f64 rounding of the bounds.
    if let Some(min) = f.min_amount {
        qb.push(" AND amount >= ").push_bind(encode_decimal(&min));
    }
    if let Some(max) = f.max_amount {
        qb.push(" AND amount <= ").push_bind(encode_decimal(&max));
    }
    if let Some(min) = f.min_converted_amount {
        qb.push(" AND converted_amount >= ")
            .push_bind(encode_decimal(&min));
    }
    if let Some(max) = f.max_converted_amount {
        qb.push(" AND converted_amount <= ")
            .push_bind(encode_decimal(&max));
    }

    // Timestamps are normalized to UTC and stored fixed-width, so string
    // comparison is temporal comparison.
    if let Some(from_ts) = &f.created_at_from {
        qb.push(" AND created_at >= ").push_bind(format_timestamp(from_ts));
    }
    if let Some(to_ts) = &f.created_at_to {
        qb.push(" AND created_at <= ").push_bind(format_timestamp(to_ts));
    }

    // Case-insensitive literal substring on the transaction id. Blank tokens
    // impose no predicate.
    if let Some(token) = &f.transaction_id_contains {
        let token = token.trim();
        if !token.is_empty() {
            qb.push(" AND LOWER(transaction_id) LIKE ")
                .push_bind(format!("%{}%", escape_like(&token.to_lowercase())))
                .push(" ESCAPE '\\'");
        }
    }
}

/// Maps a caller-facing sort property onto a sortable column expression.
/// Unknown properties are ignored.
fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "createdAt" | "created_at" => Some("created_at"),
        "amount" => Some("amount"),
        "convertedAmount" | "converted_amount" => Some("converted_amount"),
        "transactionId" | "transaction_id" => Some("transaction_id"),
        _ => None,
    }
}

fn push_order_by(qb: &mut QueryBuilder<'_, Sqlite>, sort: &[SortOrder]) {
    let mut first = true;
    for order in sort {
        let Some(column) = sort_column(&order.property) else {
            continue;
        };
        qb.push(if first { " ORDER BY " } else { ", " });
        qb.push(column);
        qb.push(match order.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        first = false;
    }
    if first {
        qb.push(" ORDER BY created_at DESC");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ConversionRepository for SqliteConversionRepo {
    async fn save(&self, mut record: NewConversion) -> Result<ConversionRecord, RepoError> {
        record.assign_defaults_if_absent();

        let id = Uuid::new_v4();
        // assign_defaults_if_absent guarantees both fields below.
        let transaction_id = record.transaction_id.clone().unwrap_or_default();
        let created_at = record.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"INSERT INTO conversions
               (id, transaction_id, from_currency, to_currency, amount, converted_amount, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(&transaction_id)
        .bind(record.from_currency.code())
        .bind(record.to_currency.code())
        .bind(encode_decimal(&record.amount))
        .bind(encode_decimal(&record.converted_amount))
        .bind(format_timestamp(&created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(ConversionRecord {
            id: ConversionId::from_uuid(id),
            transaction_id,
            from_currency: record.from_currency,
            to_currency: record.to_currency,
            amount: record.amount,
            converted_amount: record.converted_amount,
            created_at,
        })
    }

    async fn search(
        &self,
        filter: Option<&HistoryFilter>,
        page: &PageQuery,
    ) -> Result<(Vec<ConversionRecord>, u64), RepoError> {
        // Count over exactly the same predicate set as the page query.
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM conversions");
        push_predicates(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, transaction_id, from_currency, to_currency, amount, converted_amount, created_at FROM conversions",
        );
        push_predicates(&mut qb, filter);
        push_order_by(&mut qb, &page.sort);
        qb.push(" LIMIT ")
            .push_bind(i64::from(page.page_size))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows: Vec<DbConversionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let content = rows
            .into_iter()
            .map(DbConversionRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((content, total as u64))
    }
}
