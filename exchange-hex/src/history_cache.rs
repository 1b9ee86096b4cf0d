//! Memoized history search results.
//!
//! Keys are a deterministic serialization of filter + paging (fixed field
//! order, see [`history_cache_key`]); any change to the key format is a
//! breaking change that requires clearing deployed caches. Invalidation is
//! coarse: the whole cache is cleared on every successful conversion, and
//! again on a fixed wall-clock interval, since any new record can affect any
//! filtered view.

use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use exchange_types::{ConversionRecord, HistoryFilter, PageQuery, PageResult};

/// Builds the cache key for one history search.
///
/// Two logically identical filter+paging inputs always produce identical
/// keys; the absent filter gets its own `nofilter` marker so it never
/// collides with an all-empty filter.
pub fn history_cache_key(filter: Option<&HistoryFilter>, page: &PageQuery) -> String {
    let mut key = String::from("history::");

    match filter {
        None => key.push_str("nofilter"),
        Some(f) => {
            let _ = write!(
                key,
                "from={}|to={}|minAmt={}|maxAmt={}|minConv={}|maxConv={}|fromDate={}|toDate={}|txPart={}",
                opt(&f.from),
                opt(&f.to),
                opt(&f.min_amount),
                opt(&f.max_amount),
                opt(&f.min_converted_amount),
                opt(&f.max_converted_amount),
                opt(&f.created_at_from.map(|ts| ts.to_rfc3339())),
                opt(&f.created_at_to.map(|ts| ts.to_rfc3339())),
                opt(&f.transaction_id_contains),
            );
        }
    }

    let _ = write!(key, "|page={}|size={}|sort=", page.page_number, page.page_size);
    for order in &page.sort {
        let _ = write!(key, "{}:{},", order.property, order.direction);
    }

    key
}

fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Shared cache of history search pages.
///
/// Entries either hold a full result or do not exist; readers racing a clear
/// observe the pre- or post-clear state, never a partial entry.
pub struct HistoryCache {
    entries: DashMap<String, PageResult<ConversionRecord>>,
    flush_interval: Duration,
    last_flush: Mutex<Instant>,
}

impl HistoryCache {
    pub fn new(flush_interval: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            flush_interval,
            last_flush: Mutex::new(Instant::now()),
        }
    }

    pub fn get(&self, key: &str) -> Option<PageResult<ConversionRecord>> {
        self.flush_if_due();
        self.entries.get(key).map(|entry| entry.clone())
    }

    pub fn put(&self, key: String, value: PageResult<ConversionRecord>) {
        self.flush_if_due();
        self.entries.insert(key, value);
    }

    /// Drops every entry. Does not reset the interval flush timer.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Interval-based invalidation, checked lazily on access rather than by a
    /// background task.
    fn flush_if_due(&self) {
        let mut last = self.last_flush.lock().unwrap_or_else(|e| e.into_inner());
        if last.elapsed() >= self.flush_interval {
            self.entries.clear();
            *last = Instant::now();
        }
    }
}

impl Default for HistoryCache {
    /// Ten-minute interval flush.
    fn default() -> Self {
        Self::new(Duration::from_secs(600))
    }
}
