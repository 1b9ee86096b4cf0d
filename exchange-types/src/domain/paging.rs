//! Generic pagination request/response envelope, shared by the conversion
//! history search and the upstream catalog listing.

use serde::{Deserialize, Serialize};

/// Default page size when the caller sends no paging block.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort direction for a single sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// A single (property, direction) sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A pagination request. Page numbers are 1-based; deserialized values below
/// 1 are clamped up, same as [`PageQuery::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page_number", deserialize_with = "at_least_one")]
    pub page_number: u32,
    #[serde(default = "default_page_size", deserialize_with = "at_least_one")]
    pub page_size: u32,
    #[serde(default = "default_sort")]
    pub sort: Vec<SortOrder>,
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u32::deserialize(deserializer).map(|n| n.max(1))
}

fn default_sort() -> Vec<SortOrder> {
    vec![SortOrder::desc("createdAt")]
}

impl PageQuery {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort.push(sort);
        self
    }

    /// Zero-based row offset into the result set.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for PageQuery {
    /// Page 1, size 20, sorted by creation timestamp descending.
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            sort: default_sort(),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    /// 1-based page number
    pub page_number: u32,
    pub page_size: u32,
    pub total_element_count: u64,
    pub total_page_count: u32,
}

impl<T> PageResult<T> {
    /// Builds a page from a store-backed query: the total page count is
    /// derived as `ceil(total / size)`.
    pub fn from_store(content: Vec<T>, page: &PageQuery, total_element_count: u64) -> Self {
        let size = u64::from(page.page_size.max(1));
        let total_page_count = total_element_count.div_ceil(size) as u32;
        Self {
            content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_element_count,
            total_page_count,
        }
    }

    /// Builds a page from an upstream listing that reports no true total.
    ///
    /// A full page implies at least one more page exists; a short or empty
    /// page is the last one. The element count covers only the current page's
    /// content - an acknowledged approximation, not a corpus total.
    pub fn from_catalog_page(content: Vec<T>, page: &PageQuery) -> Self {
        let len = content.len() as u64;
        let total_page_count = if len == u64::from(page.page_size) {
            page.page_number.saturating_add(1)
        } else {
            page.page_number.max(1)
        };
        Self {
            content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_element_count: len,
            total_page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_query() {
        let page = PageQuery::default();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.sort, vec![SortOrder::desc("createdAt")]);
    }

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageQuery::new(1, 20).offset(), 0);
        assert_eq!(PageQuery::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_page_number_clamped_to_one() {
        assert_eq!(PageQuery::new(0, 20).page_number, 1);
    }

    #[test]
    fn test_total_page_count_rounds_up() {
        let page = PageQuery::new(1, 20);
        let result: PageResult<u32> = PageResult::from_store(vec![], &page, 41);
        assert_eq!(result.total_page_count, 3);
    }

    #[test]
    fn test_empty_store_reports_zero_pages() {
        let page = PageQuery::new(1, 20);
        let result: PageResult<u32> = PageResult::from_store(vec![], &page, 0);
        assert_eq!(result.total_page_count, 0);
        assert_eq!(result.total_element_count, 0);
    }

    #[test]
    fn test_full_catalog_page_implies_another_page() {
        let page = PageQuery::new(3, 2);
        let result = PageResult::from_catalog_page(vec!["BTC", "ETH"], &page);
        assert_eq!(result.total_page_count, 4);
        assert_eq!(result.total_element_count, 2);
    }

    #[test]
    fn test_short_catalog_page_is_the_last_page() {
        let page = PageQuery::new(3, 2);
        let result = PageResult::from_catalog_page(vec!["BTC"], &page);
        assert_eq!(result.total_page_count, 3);
        assert_eq!(result.total_element_count, 1);
    }

    #[test]
    fn test_full_catalog_page_count_saturates_at_max_page_number() {
        let page = PageQuery::new(u32::MAX, 1);
        let result = PageResult::from_catalog_page(vec!["BTC"], &page);
        assert_eq!(result.total_page_count, u32::MAX);
    }

    #[test]
    fn test_empty_catalog_page_still_reports_one_page() {
        let page = PageQuery::new(1, 2);
        let result: PageResult<&str> = PageResult::from_catalog_page(vec![], &page);
        assert_eq!(result.total_page_count, 1);
        assert_eq!(result.total_element_count, 0);
    }

    #[test]
    fn test_paging_block_deserializes_with_defaults() {
        let page: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(page, PageQuery::default());

        let page: PageQuery =
            serde_json::from_str(r#"{"page_number": 2, "page_size": 25}"#).unwrap();
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.sort, vec![SortOrder::desc("createdAt")]);
    }

    #[test]
    fn test_deserialized_zero_paging_is_clamped_to_one() {
        let page: PageQuery =
            serde_json::from_str(r#"{"page_number": 0, "page_size": 0}"#).unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 1);
    }
}
