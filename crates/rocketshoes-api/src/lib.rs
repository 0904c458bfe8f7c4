//! # rocketshoes-api: Remote Lookups for RocketShoes
//!
//! HTTP implementations of [`CatalogLookup`](rocketshoes_core::CatalogLookup)
//! and [`StockLookup`](rocketshoes_core::StockLookup).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocketshoes_api::{ClientConfig, HttpLookupClient};
//!
//! let client = HttpLookupClient::new(ClientConfig::new("http://localhost:3333"))?;
//! let stock = client.fetch_stock(1).await?;
//! ```

pub mod client;
pub mod error;

pub use client::{ClientConfig, HttpLookupClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
