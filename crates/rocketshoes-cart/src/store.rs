//! # Cart Store
//!
//! The single owner of the cart. Every mutation runs as one transition:
//! look up what is needed, build the next cart from a working copy, check
//! stock, persist, publish.
//!
//! ## Mutation Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Cart Mutation                                  │
//! │                                                                         │
//! │  add_product / remove_product / update_product_amount                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  acquire mutation lock ◄── held until the transition is published      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookups (catalog ∥ stock)          ── fail ──► generic message        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  working copy = cart.clone()                                           │
//! │  stock predicate                    ── fail ──► "exceeds stock"        │
//! │  apply change to working copy       ── fail ──► generic message        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serialize + PersistentKv::set      ── fail ──► generic message        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  publish working copy as the cart                                      │
//! │                                                                         │
//! │  Any failure leaves both the cart and the snapshot untouched.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Mutations are serialized by one `tokio::sync::Mutex`, so two concurrent
//! `add_product(7)` calls produce amount 2, never a lost update. Reads take
//! only the short `RwLock` around the published cart and never wait on a
//! lookup.
//!
//! ## Failures
//! The three mutators return `()`. Failures are reported to the
//! [`Notifier`] and logged; the caller never sees an error.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use rocketshoes_core::validation::{check_increment, check_requested, is_actionable_amount};
use rocketshoes_core::{
    messages, Cart, CatalogLookup, CoreError, CoreResult, ItemLookup, LineItem, Notifier,
    PersistentKv, ProductId, StockLookup, UpdateProductAmount, CART_STORAGE_KEY,
};

// =============================================================================
// Construction
// =============================================================================

/// The collaborators a [`CartStore`] is built from.
///
/// ## Example
/// ```rust,ignore
/// let client = Arc::new(HttpLookupClient::new(ClientConfig::default())?);
/// let deps = CartDeps::new(client.clone(), client, Arc::new(db.key_values()), notifier)
///     .storage_key("@RocketShoes:cart");
/// let store = CartStore::open(deps).await;
/// ```
#[derive(Clone)]
pub struct CartDeps {
    pub catalog: Arc<dyn CatalogLookup>,
    pub stock: Arc<dyn StockLookup>,
    pub storage: Arc<dyn PersistentKv>,
    pub notifier: Arc<dyn Notifier>,

    /// Key of the persisted snapshot.
    /// Default: `@RocketShoes:cart`
    pub storage_key: String,
}

impl CartDeps {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        stock: Arc<dyn StockLookup>,
        storage: Arc<dyn PersistentKv>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        CartDeps {
            catalog,
            stock,
            storage,
            notifier,
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Sets the key of the persisted snapshot.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Which mutation a failure belongs to.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => messages::ADD_FAILED,
            Operation::Remove => messages::REMOVE_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
        }
    }
}

/// In-memory cart state container with durable snapshots.
///
/// Shared as `Arc<CartStore>`; all methods take `&self`.
pub struct CartStore {
    catalog: Arc<dyn CatalogLookup>,
    stock: Arc<dyn StockLookup>,
    storage: Arc<dyn PersistentKv>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,

    /// The last committed cart.
    cart: RwLock<Cart>,

    /// Serializes mutations from lookup to publish.
    mutation: Mutex<()>,
}

impl CartStore {
    /// Builds the store and restores the cart from storage.
    ///
    /// ## Cold Start
    /// - snapshot present and valid → that cart
    /// - snapshot absent or malformed → empty cart
    /// - storage read fails → empty cart, logged at warn
    pub async fn open(deps: CartDeps) -> Self {
        let raw = match deps.storage.get(&deps.storage_key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %deps.storage_key, error = %e, "Could not read cart snapshot, starting empty");
                None
            }
        };

        let cart = Cart::from_snapshot(raw.as_deref());
        info!(
            key = %deps.storage_key,
            items = cart.len(),
            "Cart restored"
        );

        CartStore {
            catalog: deps.catalog,
            stock: deps.stock,
            storage: deps.storage,
            notifier: deps.notifier,
            storage_key: deps.storage_key,
            cart: RwLock::new(cart),
            mutation: Mutex::new(()),
        }
    }

    /// Key the snapshot is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The current cart.
    ///
    /// Reading never mutates; two calls with no mutation in between are equal.
    pub fn cart(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    /// Runs `f` with read access to the current cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let units = store.with_cart(|cart| cart.total_quantity());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.read().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Adds one unit of a product.
    ///
    /// A product already in the cart is incremented by exactly one if stock
    /// allows it; a new product is appended with amount 1 and the catalog
    /// fields of the moment.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) {
        debug!("add_product");
        let _guard = self.mutation.lock().await;

        let outcome = match self.next_after_add(product_id).await {
            Ok(next) => self.commit(next).await,
            Err(e) => Err(e),
        };
        self.report(Operation::Add, outcome);
    }

    /// Removes a product's line item. Other items keep their order.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) {
        debug!("remove_product");
        let _guard = self.mutation.lock().await;

        let outcome = match self.with_cart(|cart| cart.without(product_id)) {
            Ok(next) => self.commit(next).await,
            Err(e) => Err(e),
        };
        self.report(Operation::Remove, outcome);
    }

    /// Sets the amount of a product already in the cart.
    ///
    /// ## Behavior
    /// - `amount <= 0`: ignored, no lookup and no notification
    /// - stock below `amount`: "requested quantity exceeds stock"
    /// - product not in cart: "failed to change product quantity"
    ///
    /// The stock check runs before the presence check.
    #[instrument(skip(self, request), fields(product_id = request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        debug!("update_product_amount");
        if !is_actionable_amount(request.amount) {
            debug!("Non-positive amount ignored");
            return;
        }

        let _guard = self.mutation.lock().await;

        let outcome = match self.next_after_update(request).await {
            Ok(next) => self.commit(next).await,
            Err(e) => Err(e),
        };
        self.report(Operation::Update, outcome);
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    async fn next_after_add(&self, product_id: ProductId) -> CoreResult<Cart> {
        let (product, stock) = tokio::try_join!(
            self.catalog.product(product_id),
            self.stock.stock(product_id)
        )?;

        let mut next = self.cart();
        match next.find(product_id) {
            ItemLookup::Found(existing) => {
                check_increment(existing, stock)?;
                next.increment(product_id)?;
            }
            ItemLookup::NotFound => {
                next.push(LineItem::from_catalog(product));
            }
        }

        Ok(next)
    }

    async fn next_after_update(&self, request: UpdateProductAmount) -> CoreResult<Cart> {
        let UpdateProductAmount { product_id, amount } = request;
        let stock = self.stock.stock(product_id).await?;

        let mut next = self.cart();
        check_requested(product_id, amount, stock)?;

        if let ItemLookup::NotFound = next.find(product_id) {
            return Err(CoreError::NotInCart(product_id));
        }
        next.set_amount(product_id, amount)?;

        Ok(next)
    }

    /// Persists `next` and, only once storage accepted it, publishes it.
    async fn commit(&self, next: Cart) -> CoreResult<()> {
        let snapshot = next.to_snapshot()?;
        self.storage.set(&self.storage_key, &snapshot).await?;

        let items = next.len();
        *self.cart.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(items, "Cart committed");
        Ok(())
    }

    fn report(&self, operation: Operation, outcome: CoreResult<()>) {
        let Err(err) = outcome else {
            return;
        };

        if err.is_stock_exhaustion() {
            debug!(error = %err, "Stock ceiling reached");
            self.notifier.error(messages::STOCK_EXCEEDED);
        } else {
            warn!(?operation, error = %err, "Cart operation failed");
            self.notifier.error(operation.failure_message());
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::memory::{InMemoryCatalog, MemoryKv, RecordingNotifier};
    use rocketshoes_core::CatalogProduct;

    async fn store(kv: MemoryKv) -> (CartStore, InMemoryCatalog, RecordingNotifier) {
        let catalog = InMemoryCatalog::new();
        catalog.insert(CatalogProduct::new(1, "Runner", 139.9, "runner.jpg"), 2);
        let notifier = RecordingNotifier::new();

        let deps = CartDeps::new(
            Arc::new(catalog.clone()),
            Arc::new(catalog.clone()),
            Arc::new(kv),
            Arc::new(notifier.clone()),
        );
        (CartStore::open(deps).await, catalog, notifier)
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let kv = MemoryKv::new();
        let catalog = InMemoryCatalog::new();
        catalog.insert(CatalogProduct::new(1, "Runner", 139.9, "runner.jpg"), 2);

        let deps = CartDeps::new(
            Arc::new(catalog.clone()),
            Arc::new(catalog),
            Arc::new(kv.clone()),
            Arc::new(RecordingNotifier::new()),
        )
        .storage_key("test:cart");
        let store = CartStore::open(deps).await;

        store.add_product(1).await;

        assert_eq!(store.storage_key(), "test:cart");
        assert!(kv.raw("test:cart").is_some());
        assert!(kv.raw(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_with_cart_reads_committed_state() {
        let (store, _, _) = store(MemoryKv::new()).await;

        store.add_product(1).await;
        store.add_product(1).await;

        assert_eq!(store.with_cart(|c| c.total_quantity()), 2);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(Operation::Add.failure_message(), "failed to add product");
        assert_eq!(Operation::Remove.failure_message(), "failed to remove product");
        assert_eq!(
            Operation::Update.failure_message(),
            "failed to change product quantity"
        );
    }
}
