//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use exchange_types::{ConversionRepository, QuoteGateway};

use super::handlers::{self, AppState};
use crate::ExchangeService;

/// HTTP Server for the exchange API.
pub struct HttpServer<R: ConversionRepository, G: QuoteGateway> {
    state: Arc<AppState<R, G>>,
}

impl<R: ConversionRepository, G: QuoteGateway> HttpServer<R, G> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ExchangeService<R, G>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/convert", post(handlers::convert::<R, G>))
            .route(
                "/api/convert/history",
                post(handlers::search_history::<R, G>),
            )
            .route("/api/convert/symbols", get(handlers::list_symbols::<R, G>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
