//! # HTTP Lookup Client
//!
//! One reqwest client serving both remote lookups of the cart store.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore::add_product(7)                                             │
//! │       │                                                                 │
//! │       ├──► CatalogLookup::product(7) ──► GET {base}/products/7         │
//! │       │                                                                 │
//! │       └──► StockLookup::stock(7) ──────► GET {base}/stock/7            │
//! │                                                                         │
//! │  (both issued concurrently; either failing aborts the add)             │
//! │                                                                         │
//! │  Response handling                                                     │
//! │  ├── 2xx  → decode JSON body                                           │
//! │  ├── 404  → ApiError::NotFound                                         │
//! │  └── else → ApiError::Status                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every request carries the configured timeout, so a hung service shows up
//! as an ordinary lookup failure instead of blocking the cart forever.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{ApiError, ApiResult};
use rocketshoes_core::{CatalogLookup, CatalogProduct, CoreResult, ProductId, StockLevel, StockLookup};

/// Default API location (the development JSON server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, with or without trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_BASE_URL)
    }
}

/// Catalog and stock lookups against the RocketShoes JSON API.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLookupClient {
    /// Builds a client.
    ///
    /// ## Errors
    /// - `ApiError::InvalidBaseUrl` unless the base URL is http(s)
    /// - `ApiError::Transport` if the underlying client cannot be built
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(HttpLookupClient { http, base_url })
    }

    /// The normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/products/{id}`
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, product_id: ProductId) -> ApiResult<CatalogProduct> {
        self.get_json("products", product_id).await
    }

    /// `GET {base}/stock/{id}`
    #[instrument(skip(self))]
    pub async fn fetch_stock(&self, product_id: ProductId) -> ApiResult<StockLevel> {
        self.get_json("stock", product_id).await
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, product_id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        product_id: ProductId,
    ) -> ApiResult<T> {
        let url = self.url(resource, product_id);
        debug!(url = %url, "Sending lookup request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource,
                id: product_id,
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogLookup for HttpLookupClient {
    async fn product(&self, product_id: ProductId) -> CoreResult<CatalogProduct> {
        Ok(self.fetch_product(product_id).await?)
    }
}

#[async_trait]
impl StockLookup for HttpLookupClient {
    async fn stock(&self, product_id: ProductId) -> CoreResult<StockLevel> {
        Ok(self.fetch_stock(product_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = HttpLookupClient::new(ClientConfig::new("http://localhost:3333/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.url("stock", 4), "http://localhost:3333/stock/4");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = HttpLookupClient::new(ClientConfig::new("ftp://example.com")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default().timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
