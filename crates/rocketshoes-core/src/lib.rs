//! # rocketshoes-core: Pure Cart Model for RocketShoes
//!
//! This crate holds everything the cart needs that is not I/O: the data
//! model, the stock rules, the user-facing messages and the interfaces of
//! the collaborators the cart store talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RocketShoes Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (CLI / storefront UI)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Arc<CartStore>                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rocketshoes-cart (CartStore)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ rocketshoes-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │ validation│  │   ports   │  │   │
//! │  │   │ LineItem  │  │   Cart    │  │  stock    │  │ Catalog   │  │   │
//! │  │   │ StockLevel│  │ ItemLookup│  │  rules    │  │ Stock, KV │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 ▲                               ▲                       │
//! │  ┌──────────────┴──────────────┐ ┌──────────────┴──────────────────┐   │
//! │  │ rocketshoes-db (SQLite KV)  │ │ rocketshoes-api (HTTP lookups)  │   │
//! │  └─────────────────────────────┘ └─────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog payloads, stock levels, line items
//! - [`cart`] - The ordered, id-unique cart and its snapshot format
//! - [`validation`] - Stock availability rules
//! - [`messages`] - User-facing notification strings
//! - [`ports`] - Collaborator traits (catalog, stock, storage, notifier)
//! - `memory` - In-memory collaborators for tests (`testing` feature)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, CatalogProduct, ItemLookup, LineItem};
//!
//! let product = CatalogProduct::new(1, "Runner", 139.9, "runner.jpg");
//! let mut cart = Cart::new();
//! cart.push(LineItem::from_catalog(product));
//!
//! assert!(matches!(cart.find(1), ItemLookup::Found(item) if item.amount == 1));
//! assert!(matches!(cart.find(2), ItemLookup::NotFound));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod messages;
pub mod ports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, ItemLookup};
pub use error::{CoreError, CoreResult};
pub use ports::{CatalogLookup, Notifier, PersistentKv, StockLookup};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the cart snapshot is persisted.
///
/// Namespaced so it can share a key-value store with other front-end state.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
