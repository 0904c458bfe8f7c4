//! # Collaborator Interfaces
//!
//! The four things a cart store depends on, as traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore                                       │
//! │                                                                         │
//! │   CatalogLookup      StockLookup       PersistentKv        Notifier     │
//! │   (remote, async)    (remote, async)   (local, async)      (local)      │
//! │        │                  │                 │                  │        │
//! │        ▼                  ▼                 ▼                  ▼        │
//! │   HttpLookupClient   HttpLookupClient  KeyValueRepository  Tracing /    │
//! │   InMemoryCatalog    InMemoryCatalog   MemoryKv            Terminal /   │
//! │                                                            Recording    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All traits are object safe so the store can hold `Arc<dyn ...>` and the
//! wiring layer can choose implementations at runtime.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{CatalogProduct, ProductId, StockLevel};

/// Read-only product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetches a product. Fails on not-found and on transport errors.
    async fn product(&self, product_id: ProductId) -> CoreResult<CatalogProduct>;
}

/// Read-only stock levels.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Fetches the available quantity. Same failure contract as the catalog.
    async fn stock(&self, product_id: ProductId) -> CoreResult<StockLevel>;
}

/// String key-value storage for the cart snapshot.
#[async_trait]
pub trait PersistentKv: Send + Sync {
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}
