//! reqwest-backed dispatcher for the Shopware sales-channel API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{ApiAction, ApiCall, ApiDispatcher, ApiResponse, TokenType};
use crate::error::ApiError;

/// Header carrying the sales-channel access key.
pub const SW_ACCESS_KEY_HEADER: &str = "sw-access-key";

/// Dispatches API calls over HTTP.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
    base_url: Url,
    access_key: Option<String>,
}

impl HttpDispatcher {
    /// Create a dispatcher for `base_url`.
    ///
    /// Endpoints are appended to the base url, so a shop installed under a
    /// sub-path (`https://host/shop`) keeps that path.
    pub fn new(
        base_url: &str,
        access_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            access_key,
        })
    }

    /// Full url of `endpoint` (path plus query) under the base url.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{endpoint}"))?)
    }
}

fn method_for(action: ApiAction) -> Method {
    match action {
        ApiAction::Get => Method::GET,
    }
}

#[async_trait]
impl ApiDispatcher for HttpDispatcher {
    async fn call(&self, request: ApiCall) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint_url(&request.endpoint)?;
        debug!(action = ?request.action, url = %url, "dispatching api call");

        let mut builder = self.client.request(method_for(request.action), url.clone());

        match (request.token_type, &self.access_key) {
            (TokenType::Sw, Some(key)) => builder = builder.header(SW_ACCESS_KEY_HEADER, key),
            (TokenType::Sw, None) => {
                warn!(url = %url, "sales-channel call without an access key configured");
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(ApiResponse { data })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpDispatcher::new("not a url", None, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::Url(_)));
    }

    #[test]
    fn endpoint_appends_to_base_url() {
        for (base, expected) in [
            ("https://shop.example", "https://shop.example/sales-channel-api/v1/category?limit=100"),
            ("https://shop.example/", "https://shop.example/sales-channel-api/v1/category?limit=100"),
            (
                "https://host.example/shop",
                "https://host.example/shop/sales-channel-api/v1/category?limit=100",
            ),
            (
                "https://host.example/shop/",
                "https://host.example/shop/sales-channel-api/v1/category?limit=100",
            ),
        ] {
            let dispatcher = HttpDispatcher::new(base, None, Duration::from_secs(1)).unwrap();
            let url = dispatcher
                .endpoint_url("/sales-channel-api/v1/category?limit=100")
                .unwrap();
            assert_eq!(url.as_str(), expected, "base {base}");
        }
    }

    #[test]
    fn get_maps_to_http_get() {
        assert_eq!(method_for(ApiAction::Get), Method::GET);
    }
}
