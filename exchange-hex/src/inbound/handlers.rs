//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use exchange_types::{
    AppError, ConversionRepository, ConvertRequest, PageQuery, QuoteGateway, SearchHistoryRequest,
    domain::DEFAULT_PAGE_SIZE,
};

use crate::ExchangeService;

/// Application state shared across handlers.
pub struct AppState<R: ConversionRepository, G: QuoteGateway> {
    pub service: ExchangeService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UpstreamUnavailable { .. } => (StatusCode::BAD_GATEWAY, self.0.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between two catalog currencies and persist the result.
#[tracing::instrument(skip(state), fields(from = %req.from, to = %req.to))]
pub async fn convert<R: ConversionRepository, G: QuoteGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<ConvertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.convert(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Filtered, paginated search over the conversion history.
#[tracing::instrument(skip(state, req))]
pub async fn search_history<R: ConversionRepository, G: QuoteGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<SearchHistoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.service.search_history(req).await?;
    Ok(Json(page))
}

/// Query parameters for the catalog listing.
#[derive(Debug, serde::Deserialize)]
pub struct CatalogPageParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Paginated listing of the upstream symbol catalog.
#[tracing::instrument(skip(state))]
pub async fn list_symbols<R: ConversionRepository, G: QuoteGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Query(params): Query<CatalogPageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageQuery::new(
        params.page_number.unwrap_or(1),
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    );

    let result = state.service.list_symbols(page).await?;
    Ok(Json(result))
}
