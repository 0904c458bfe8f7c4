//! # API Error Types
//!
//! Failures of the HTTP lookup client.
//!
//! ## Error Mapping
//! ```text
//! HTTP 404                   → ApiError::NotFound   → CoreError::ProductNotFound
//! other non-2xx status       → ApiError::Status     → CoreError::LookupFailed
//! connect / timeout / TLS    → ApiError::Transport  → CoreError::LookupFailed
//! body is not the expected   → ApiError::Decode     → CoreError::LookupFailed
//! ```

use rocketshoes_core::{CoreError, ProductId};
use thiserror::Error;

/// HTTP lookup errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered 404 for this resource.
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: ProductId,
    },

    /// The service answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured base URL is unusable.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { id, .. } => CoreError::ProductNotFound(id),
            other => CoreError::lookup(other.to_string()),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
