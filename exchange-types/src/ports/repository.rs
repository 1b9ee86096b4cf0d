//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, in-memory test doubles) implement this trait.

use crate::domain::{ConversionRecord, NewConversion, PageQuery};
use crate::dto::HistoryFilter;
use crate::error::RepoError;

/// The conversion history store.
///
/// Persistence assigns the storage id and, via the record's pre-persist
/// defaults, the creation timestamp. Records are append-only: there is no
/// update or delete operation on this port.
#[async_trait::async_trait]
pub trait ConversionRepository: Send + Sync + 'static {
    /// Persists a new conversion and returns it with the assigned identifier
    /// and creation timestamp (read-your-write).
    async fn save(&self, record: NewConversion) -> Result<ConversionRecord, RepoError>;

    /// Criteria search: every non-null filter field contributes one ANDed
    /// predicate; a `None` filter matches all records. Paging, sorting and
    /// the total count are computed by the store over the same predicate set.
    ///
    /// Returns the page content and the exact total element count.
    async fn search(
        &self,
        filter: Option<&HistoryFilter>,
        page: &PageQuery,
    ) -> Result<(Vec<ConversionRecord>, u64), RepoError>;
}

/// Shared-handle delegation, so callers can keep a handle to an adapter they
/// hand to the service.
#[async_trait::async_trait]
impl<T: ConversionRepository> ConversionRepository for std::sync::Arc<T> {
    async fn save(&self, record: NewConversion) -> Result<ConversionRecord, RepoError> {
        (**self).save(record).await
    }

    async fn search(
        &self,
        filter: Option<&HistoryFilter>,
        page: &PageQuery,
    ) -> Result<(Vec<ConversionRecord>, u64), RepoError> {
        (**self).search(filter, page).await
    }
}
