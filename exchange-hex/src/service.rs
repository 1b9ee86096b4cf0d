//! Exchange Application Service
//!
//! Orchestrates the conversion pipeline and the history search through the
//! repository and gateway ports. Contains NO infrastructure logic - pure
//! business orchestration plus the resilience/cache policies layered on the
//! gateway.

use rust_decimal::Decimal;

use exchange_types::{
    AppError, ConversionRepository, ConversionRecord, ConvertRequest, CurrencySymbolEntry,
    NewConversion, PageQuery, PageResult, QuoteGateway, SearchHistoryRequest,
};

use crate::history_cache::{HistoryCache, history_cache_key};
use crate::resilience::ResilienceEnvelope;

/// Upstream catalog sort key for the symbol listing.
const CATALOG_SORT_KEY: &str = "cmc_rank";

/// Application service for the exchange API.
///
/// Generic over `R: ConversionRepository` and `G: QuoteGateway` - adapters
/// are injected at compile time, which keeps tests on in-memory doubles.
pub struct ExchangeService<R: ConversionRepository, G: QuoteGateway> {
    repo: R,
    gateway: G,
    envelope: ResilienceEnvelope,
    cache: HistoryCache,
}

impl<R: ConversionRepository, G: QuoteGateway> ExchangeService<R, G> {
    /// Creates a service with default resilience and cache policies.
    pub fn new(repo: R, gateway: G) -> Self {
        Self::with_policies(
            repo,
            gateway,
            ResilienceEnvelope::default(),
            HistoryCache::default(),
        )
    }

    /// Creates a service with explicit policies (startup wiring and tests).
    pub fn with_policies(
        repo: R,
        gateway: G,
        envelope: ResilienceEnvelope,
        cache: HistoryCache,
    ) -> Self {
        Self {
            repo,
            gateway,
            envelope,
            cache,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` of `from` into `to` at the current upstream quote
    /// and persists the result as a history record.
    ///
    /// The upstream response is validated stage by stage; any violation, and
    /// any failure the resilience envelope could not absorb, surfaces as a
    /// single conversion-failed error with the originating cause attached.
    /// Nothing is persisted on any failure path.
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConversionRecord, AppError> {
        if req.from == req.to {
            return Err(AppError::BadRequest(
                "Source and target symbols must differ".into(),
            ));
        }
        if req.amount <= Decimal::ZERO {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }

        // Canonical decimal string without trailing zeros.
        let amount = req.amount.normalize().to_string();
        let response = self
            .envelope
            .call(|| self.gateway.price_conversion(&amount, req.from, req.to))
            .await
            .map_err(|e| AppError::upstream_with("Upstream conversion unavailable", e))?;

        let status = response
            .status
            .ok_or_else(|| AppError::upstream("Upstream response is missing its status block"))?;
        if status.error_code != 0 {
            let message = status
                .error_message
                .unwrap_or_else(|| "no error message".into());
            return Err(AppError::upstream(format!(
                "Upstream reported error {}: {}",
                status.error_code, message
            )));
        }

        let data = response
            .data
            .ok_or_else(|| AppError::upstream("Upstream response is missing its data payload"))?;
        let quote = data
            .quote
            .as_ref()
            .and_then(|quotes| quotes.get(req.to.code()))
            .ok_or_else(|| {
                AppError::upstream(format!("Upstream quote has no entry for {}", req.to))
            })?;
        let unit_price = quote.price.ok_or_else(|| {
            AppError::upstream(format!("Upstream quote for {} has a null price", req.to))
        })?;

        // Exact decimal product; precision is preserved, never truncated here.
        let converted_amount = unit_price * req.amount;

        let record = self
            .repo
            .save(NewConversion::new(
                req.from,
                req.to,
                req.amount,
                converted_amount,
            ))
            .await?;

        // Any new record can affect any filtered view.
        self.cache.clear();

        tracing::info!(
            transaction_id = %record.transaction_id,
            from = %record.from_currency,
            to = %record.to_currency,
            "Conversion persisted"
        );

        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History search
    // ─────────────────────────────────────────────────────────────────────────────

    /// Filtered, paginated search over the conversion history.
    ///
    /// An absent paging block defaults to page 1, size 20, newest first; an
    /// absent filter matches all records. Results are memoized per
    /// filter+paging key.
    pub async fn search_history(
        &self,
        req: SearchHistoryRequest,
    ) -> Result<PageResult<ConversionRecord>, AppError> {
        let page = req.paging.unwrap_or_default();
        let filter = req.filter;

        let key = history_cache_key(filter.as_ref(), &page);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%key, "History cache hit");
            return Ok(hit);
        }

        self.envelope.acquire().await;

        let (content, total) = self.repo.search(filter.as_ref(), &page).await?;
        let result = PageResult::from_store(content, &page, total);

        self.cache.put(key, result.clone());
        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Symbol catalog
    // ─────────────────────────────────────────────────────────────────────────────

    /// Paginated read-through listing of the upstream symbol catalog.
    ///
    /// Not cached; the upstream reports no true total, so the page count is
    /// estimated from whether the returned page came back full.
    pub async fn list_symbols(
        &self,
        page: PageQuery,
    ) -> Result<PageResult<CurrencySymbolEntry>, AppError> {
        self.envelope.acquire().await;

        // 1-based offset into the upstream catalog, computed in u64 so
        // oversized query parameters cannot overflow.
        let start = u32::try_from(page.offset().saturating_add(1)).unwrap_or(u32::MAX);
        let response = self
            .gateway
            .symbol_map(start, page.page_size, CATALOG_SORT_KEY)
            .await
            .map_err(|e| AppError::upstream_with("Upstream catalog unavailable", e))?;

        if let Some(status) = &response.status {
            if status.error_code != 0 {
                let message = status
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "no error message".into());
                return Err(AppError::upstream(format!(
                    "Upstream reported error {}: {}",
                    status.error_code, message
                )));
            }
        }

        let entries: Vec<CurrencySymbolEntry> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| match (item.name, item.symbol) {
                (Some(name), Some(symbol)) => Some(CurrencySymbolEntry { name, symbol }),
                _ => None,
            })
            .collect();

        Ok(PageResult::from_catalog_page(entries, &page))
    }
}
