//! # Exchange Repository
//!
//! Concrete repository adapters for the crypto exchange service.
//! This crate provides database adapters that implement the
//! `ConversionRepository` port.

#[cfg(not(feature = "sqlite"))]
compile_error!("Enable a repo feature: `sqlite`.");

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConversionRepo;

/// Build and initialize a repository from a database URL.
///
/// Connects, runs the embedded migration, and returns a ready-to-use
/// repository.
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://exchange.db?mode=rwc").await?;
/// ```
#[cfg(feature = "sqlite")]
pub async fn build_repo(database_url: &str) -> anyhow::Result<SqliteConversionRepo> {
    SqliteConversionRepo::new(database_url).await
}
