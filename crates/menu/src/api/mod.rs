//! API call dispatching.
//!
//! The menu never talks HTTP directly: it hands an [`ApiCall`] to an
//! [`ApiDispatcher`]. [`HttpDispatcher`] is the reqwest-backed implementation;
//! tests plug in their own.

mod http;

pub use http::{HttpDispatcher, SW_ACCESS_KEY_HEADER};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// HTTP action of an API call. The menu only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiAction {
    Get,
}

/// Which credential the dispatcher attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Shopware sales-channel access key.
    Sw,
}

/// Which API family the endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    Data,
}

/// A single API request description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCall {
    pub action: ApiAction,
    /// Path and query, appended to the dispatcher's base url.
    pub endpoint: String,
    pub token_type: TokenType,
    pub api_type: ApiType,
}

impl ApiCall {
    /// A data-API GET authenticated with the sales-channel key.
    pub fn sw_get(endpoint: impl Into<String>) -> Self {
        Self {
            action: ApiAction::Get,
            endpoint: endpoint.into(),
            token_type: TokenType::Sw,
            api_type: ApiType::Data,
        }
    }
}

/// Dispatcher response; `data` is the decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub data: Value,
}

/// Executes [`ApiCall`]s.
#[async_trait]
pub trait ApiDispatcher: Send + Sync {
    async fn call(&self, request: ApiCall) -> Result<ApiResponse, ApiError>;
}
