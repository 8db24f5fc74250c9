//! Error types for menu fetching and configuration.

use thiserror::Error;

/// Errors raised by an [`ApiDispatcher`](crate::api::ApiDispatcher).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// Failure reported by a non-HTTP dispatcher (tests, alternate backends).
    #[error("{0}")]
    Other(String),
}

/// Menu module errors.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The category request failed. The display text is a fixed signal for
    /// UI callers; the underlying failure is kept as the source.
    #[error("API request failed!")]
    ApiRequest(#[source] ApiError),

    #[error("invalid menu config: {0}")]
    Config(String),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
