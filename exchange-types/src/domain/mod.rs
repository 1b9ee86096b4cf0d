//! Pure domain types - no IO, no framework dependencies.

mod conversion;
mod currency;
mod paging;

pub use conversion::{ConversionId, ConversionRecord, NewConversion};
pub use currency::{CryptoCurrency, CurrencySymbolEntry};
pub use paging::{DEFAULT_PAGE_SIZE, PageQuery, PageResult, SortDirection, SortOrder};
