//! Error types for the exchange service.

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes; `UpstreamUnavailable` is the single
/// uniform "conversion failed" condition and always carries the reason, plus
/// the originating cause when one exists.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conversion failed: {reason}")]
    UpstreamUnavailable {
        reason: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Upstream failure with a reason but no underlying cause (e.g. a
    /// well-formed response that fails validation).
    pub fn upstream(reason: impl Into<String>) -> Self {
        AppError::UpstreamUnavailable {
            reason: reason.into(),
            cause: None,
        }
    }

    /// Upstream failure wrapping the error that triggered it.
    pub fn upstream_with(
        reason: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::UpstreamUnavailable {
            reason: reason.into(),
            cause: Some(Box::new(cause)),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Corrupt(e) => AppError::Internal(e),
        }
    }
}
