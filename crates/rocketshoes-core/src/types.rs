//! # Domain Types
//!
//! Types exchanged between the cart and its collaborators.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │   │   StockLevel    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  amount         │   │  id             │       │
//! │  │  ...fields      │   │                 │   │  amount         │       │
//! │  │   name          │   │                 │   │  ...fields      │       │
//! │  │   price         │   │                 │   │   (frozen)      │       │
//! │  │   image         │   │                 │   │                 │       │
//! │  └────────┬────────┘   └─────────────────┘   └────────▲────────┘       │
//! │           │            LineItem::from_catalog         │                │
//! │           └───────────────────────────────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item copies the catalog payload at the moment it is added and is
//! never refreshed afterwards. Apart from `id` and `amount` nothing is typed:
//! catalog fields ride in a flattened JSON map and are written back out
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Product identifier as used by the catalog and stock services.
pub type ProductId = i64;

// =============================================================================
// Catalog Product
// =============================================================================

/// A product as returned by the catalog lookup.
///
/// Only `id` is typed. Everything else (`name`, `price`, `image` and whatever
/// the catalog adds) stays as the catalog sent it, so an integer price is
/// written back as an integer and a product without an image still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    pub id: ProductId,

    /// Catalog fields other than `id`, kept verbatim.
    #[serde(flatten)]
    #[ts(skip)]
    pub fields: Map<String, Value>,
}

impl CatalogProduct {
    /// Creates a catalog product carrying `name`, `price` and `image`.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: impl Into<Value>,
        image: impl Into<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        fields.insert("price".to_string(), price.into());
        fields.insert("image".to_string(), Value::String(image.into()));
        CatalogProduct { id, fields }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Price exactly as sent: number, string, or absent.
    pub fn price(&self) -> Option<&Value> {
        self.fields.get("price")
    }

    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Available quantity for a product, as reported by the stock lookup.
///
/// Independent of what is in the cart: reserving stock is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel {
    pub amount: i64,
}

impl StockLevel {
    #[inline]
    pub const fn new(amount: i64) -> Self {
        StockLevel { amount }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product ID, unique within a cart.
    pub id: ProductId,

    /// Requested quantity, always >= 1 for items held in a cart.
    pub amount: i64,

    /// Catalog fields at time of adding (frozen).
    #[serde(flatten)]
    #[ts(skip)]
    pub fields: Map<String, Value>,
}

impl LineItem {
    /// Creates a line item for a freshly added product (`amount = 1`).
    ///
    /// ## Catalog Amount
    /// Some catalogs send an `amount` of their own. It lands in `fields`
    /// during deserialization and is dropped here so the snapshot never
    /// carries two `amount` keys.
    pub fn from_catalog(product: CatalogProduct) -> Self {
        let CatalogProduct { id, mut fields } = product;
        fields.remove("amount");
        fields.remove("id");

        LineItem {
            id,
            amount: 1,
            fields,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<&Value> {
        self.fields.get("price")
    }

    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }
}

// =============================================================================
// Update Request
// =============================================================================

/// Arguments of `update_product_amount`.
///
/// `amount` is deliberately signed: non-positive values are accepted and
/// ignored by the store rather than rejected at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
