//! # rocketshoes-cart: The Cart State Container
//!
//! [`CartStore`] holds the cart in memory, mutates it through three
//! operations and keeps the persisted snapshot in step with it.
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`, `CartDeps`
//! - [`notify`] - `TracingNotifier`
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rocketshoes_cart::{CartDeps, CartStore};
//! use rocketshoes_core::memory::{InMemoryCatalog, MemoryKv, RecordingNotifier};
//! use rocketshoes_core::CatalogProduct;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let catalog = InMemoryCatalog::new();
//! catalog.insert(CatalogProduct::new(1, "Runner", 139.9, "runner.jpg"), 5);
//!
//! let store = CartStore::open(CartDeps::new(
//!     Arc::new(catalog.clone()),
//!     Arc::new(catalog),
//!     Arc::new(MemoryKv::new()),
//!     Arc::new(RecordingNotifier::new()),
//! ))
//! .await;
//!
//! store.add_product(1).await;
//! store.add_product(1).await;
//!
//! assert_eq!(store.cart().total_quantity(), 2);
//! # }
//! ```

pub mod notify;
pub mod store;

pub use notify::TracingNotifier;
pub use store::{CartDeps, CartStore};
