//! In-memory collaborators.
//!
//! Used by the cart store tests. Each one can be told to fail so the error
//! paths of the store can be exercised.
//!
//! Compiled only for this crate's tests or with the `testing` feature.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::ports::{CatalogLookup, Notifier, PersistentKv, StockLookup};
use crate::types::{CatalogProduct, ProductId, StockLevel};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Catalog + Stock
// =============================================================================

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, CatalogProduct>,
    stock: HashMap<ProductId, StockLevel>,
    fail_catalog: bool,
    fail_stock: bool,
    catalog_calls: usize,
    stock_calls: usize,
}

/// Catalog and stock service backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product together with its stock level.
    pub fn insert(&self, product: CatalogProduct, stock: i64) {
        let mut state = lock(&self.state);
        state.stock.insert(product.id, StockLevel::new(stock));
        state.products.insert(product.id, product);
    }

    /// Changes the stock level of a product.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        lock(&self.state)
            .stock
            .insert(product_id, StockLevel::new(amount));
    }

    /// Makes every catalog lookup fail until reset.
    pub fn set_fail_catalog(&self, fail: bool) {
        lock(&self.state).fail_catalog = fail;
    }

    /// Makes every stock lookup fail until reset.
    pub fn set_fail_stock(&self, fail: bool) {
        lock(&self.state).fail_stock = fail;
    }

    pub fn catalog_calls(&self) -> usize {
        lock(&self.state).catalog_calls
    }

    pub fn stock_calls(&self) -> usize {
        lock(&self.state).stock_calls
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> CoreResult<CatalogProduct> {
        let mut state = lock(&self.state);
        state.catalog_calls += 1;

        if state.fail_catalog {
            return Err(CoreError::lookup("catalog unavailable"));
        }

        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or(CoreError::ProductNotFound(product_id))
    }
}

#[async_trait]
impl StockLookup for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> CoreResult<StockLevel> {
        let mut state = lock(&self.state);
        state.stock_calls += 1;

        if state.fail_stock {
            return Err(CoreError::lookup("stock service unavailable"));
        }

        state
            .stock
            .get(&product_id)
            .copied()
            .ok_or(CoreError::ProductNotFound(product_id))
    }
}

// =============================================================================
// Key-Value Storage
// =============================================================================

#[derive(Debug, Default)]
struct KvState {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

/// Key-value store held in a hash map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    state: Arc<Mutex<KvState>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let kv = Self::new();
        lock(&kv.state).entries.insert(key.into(), value.into());
        kv
    }

    /// Reads an entry without going through the async trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        lock(&self.state).entries.get(key).cloned()
    }

    /// Makes every write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        lock(&self.state).fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        lock(&self.state).writes
    }
}

#[async_trait]
impl PersistentKv for MemoryKv {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(lock(&self.state).entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut state = lock(&self.state);
        if state.fail_writes {
            return Err(CoreError::storage("storage is read-only"));
        }
        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Notifier that remembers every message it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received, oldest first.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }

    /// How many times `message` was received.
    pub fn count(&self, message: &str) -> usize {
        lock(&self.messages)
            .iter()
            .filter(|m| m.as_str() == message)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lookup_and_failure() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(CatalogProduct::new(1, "Runner", 99.9, "r.jpg"), 5);

        assert_eq!(catalog.product(1).await.unwrap().name(), Some("Runner"));
        assert_eq!(catalog.stock(1).await.unwrap(), StockLevel::new(5));
        assert!(matches!(
            catalog.product(2).await,
            Err(CoreError::ProductNotFound(2))
        ));

        catalog.set_fail_stock(true);
        assert!(catalog.stock(1).await.is_err());
        assert!(catalog.product(1).await.is_ok());
        assert_eq!(catalog.stock_calls(), 2);
        assert_eq!(catalog.catalog_calls(), 3);
    }

    #[tokio::test]
    async fn test_memory_kv_round_trip() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("k").await.unwrap(), None);

        kv.set("k", "[]").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.writes(), 1);

        kv.set_fail_writes(true);
        assert!(kv.set("k", "[1]").await.is_err());
        assert_eq!(kv.raw("k").as_deref(), Some("[]"));
    }

    #[test]
    fn test_recording_notifier_counts() {
        let notifier = RecordingNotifier::new();
        notifier.error("a");
        notifier.error("b");
        notifier.error("a");

        assert_eq!(notifier.count("a"), 2);
        assert_eq!(notifier.messages(), vec!["a", "b", "a"]);
    }
}
