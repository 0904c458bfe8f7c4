//! # Cart
//!
//! The ordered, id-unique list of line items and its persisted form.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Value Operations                                │
//! │                                                                         │
//! │  CartStore step           Cart method             Effect                │
//! │  ──────────────           ───────────             ──────                │
//! │                                                                         │
//! │  add (existing) ────────► increment(id) ────────► items[i].amount += 1  │
//! │                                                                         │
//! │  add (new) ─────────────► push(item) ───────────► items.push(item)      │
//! │                                                                         │
//! │  update ────────────────► set_amount(id, n) ────► items[i].amount = n   │
//! │                                                                         │
//! │  remove ────────────────► without(id) ──────────► new Cart, order kept  │
//! │                                                                         │
//! │  cold start ────────────► from_snapshot(raw) ───► parsed or empty       │
//! │                                                                         │
//! │  persist ───────────────► to_snapshot() ────────► JSON array            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Insertion order is preserved by every operation.
//! - No two items share an `id`; `push` refuses a duplicate.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, ProductId};

/// Result of looking a product up in the cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemLookup<'a> {
    Found(&'a LineItem),
    NotFound,
}

impl<'a> ItemLookup<'a> {
    /// Returns the found item, if any.
    pub fn item(self) -> Option<&'a LineItem> {
        match self {
            ItemLookup::Found(item) => Some(item),
            ItemLookup::NotFound => None,
        }
    }
}

/// The shopping cart.
///
/// Serialized as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Restores a cart from its persisted snapshot.
    ///
    /// ## Fail Closed
    /// Absent or malformed content yields an empty cart, as does a snapshot
    /// with duplicate ids or an item whose amount is below 1. A bad snapshot
    /// must never keep the store from starting.
    pub fn from_snapshot(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Cart::new();
        };

        match serde_json::from_str::<Vec<LineItem>>(raw) {
            Ok(items) => Cart::from_items(items).unwrap_or_default(),
            Err(_) => Cart::new(),
        }
    }

    /// Builds a cart from items, rejecting duplicate ids and amounts below 1.
    pub fn from_items(items: Vec<LineItem>) -> Option<Self> {
        let mut cart = Cart::new();
        for item in items {
            if item.amount < 1 || !cart.push(item) {
                return None;
            }
        }
        Some(cart)
    }

    /// Serializes the cart to the persisted JSON array form.
    pub fn to_snapshot(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Looks up a line item by product id.
    pub fn find(&self, product_id: ProductId) -> ItemLookup<'_> {
        match self.items.iter().find(|i| i.id == product_id) {
            Some(item) => ItemLookup::Found(item),
            None => ItemLookup::NotFound,
        }
    }

    /// Appends an item. Returns false (and leaves the cart untouched) if an
    /// item with the same id is already present.
    pub fn push(&mut self, item: LineItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Adds exactly one unit to an existing item.
    pub fn increment(&mut self, product_id: ProductId) -> CoreResult<()> {
        let item = self.item_mut(product_id)?;
        item.amount = item.amount.saturating_add(1);
        Ok(())
    }

    /// Sets the amount of an existing item. Nothing else changes.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> CoreResult<()> {
        let item = self.item_mut(product_id)?;
        item.amount = amount;
        Ok(())
    }

    /// Returns a copy of the cart without the given product.
    ///
    /// ## Returns
    /// - `Ok(Cart)` with all other items in their original order
    /// - `Err(CoreError::NotInCart)` if the product is absent
    pub fn without(&self, product_id: ProductId) -> CoreResult<Cart> {
        if !self.contains(product_id) {
            return Err(CoreError::NotInCart(product_id));
        }

        Ok(Cart {
            items: self
                .items
                .iter()
                .filter(|i| i.id != product_id)
                .cloned()
                .collect(),
        })
    }

    /// True if a line item for this product exists.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.id == product_id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all requested amounts.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    fn item_mut(&mut self, product_id: ProductId) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == product_id)
            .ok_or(CoreError::NotInCart(product_id))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogProduct;

    fn item(id: ProductId, amount: i64) -> LineItem {
        let mut item = LineItem::from_catalog(CatalogProduct::new(
            id,
            format!("Shoe {}", id),
            99.9,
            format!("shoe-{}.jpg", id),
        ));
        item.amount = amount;
        item
    }

    fn ids(cart: &Cart) -> Vec<ProductId> {
        cart.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut cart = Cart::new();
        assert!(cart.push(item(1, 1)));
        assert!(!cart.push(item(1, 4)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_find_reports_found_and_not_found() {
        let cart = Cart::from_items(vec![item(1, 2)]).unwrap();

        assert_eq!(cart.find(1).item().map(|i| i.amount), Some(2));
        assert_eq!(cart.find(9), ItemLookup::NotFound);
    }

    #[test]
    fn test_increment_and_set_amount() {
        let mut cart = Cart::from_items(vec![item(1, 2), item(2, 1)]).unwrap();

        cart.increment(1).unwrap();
        cart.set_amount(2, 7).unwrap();

        assert_eq!(cart.find(1).item().unwrap().amount, 3);
        assert_eq!(cart.find(2).item().unwrap().amount, 7);
        assert!(matches!(cart.increment(5), Err(CoreError::NotInCart(5))));
    }

    #[test]
    fn test_without_preserves_order() {
        let cart = Cart::from_items(vec![item(1, 1), item(2, 1), item(3, 1)]).unwrap();

        let updated = cart.without(2).unwrap();

        assert_eq!(ids(&updated), vec![1, 3]);
        assert_eq!(ids(&cart), vec![1, 2, 3]);
    }

    #[test]
    fn test_without_absent_is_error() {
        let cart = Cart::from_items(vec![item(2, 1)]).unwrap();
        assert!(matches!(cart.without(1), Err(CoreError::NotInCart(1))));
    }

    #[test]
    fn test_snapshot_is_json_array() {
        let cart = Cart::from_items(vec![item(1, 2)]).unwrap();
        let raw = cart.to_snapshot().unwrap();

        assert!(raw.starts_with('['));
        assert_eq!(Cart::from_snapshot(Some(&raw)), cart);
    }

    #[test]
    fn test_snapshot_fails_closed() {
        assert!(Cart::from_snapshot(None).is_empty());
        assert!(Cart::from_snapshot(Some("not json")).is_empty());
        assert!(Cart::from_snapshot(Some("{\"id\":1}")).is_empty());
        assert!(Cart::from_snapshot(Some("[{\"id\":1}]")).is_empty());
    }

    #[test]
    fn test_snapshot_with_non_positive_amount_is_empty() {
        for amount in [0, -3] {
            let raw = serde_json::to_string(&vec![item(1, 1), item(2, amount)]).unwrap();
            assert!(Cart::from_snapshot(Some(&raw)).is_empty());
        }
        assert!(Cart::from_items(vec![item(1, 0)]).is_none());
    }

    #[test]
    fn test_snapshot_with_max_amount_restores_and_saturates() {
        let raw = serde_json::to_string(&vec![item(1, i64::MAX)]).unwrap();
        let mut cart = Cart::from_snapshot(Some(&raw));
        assert_eq!(cart.len(), 1);

        cart.increment(1).unwrap();
        assert_eq!(cart.find(1).item().unwrap().amount, i64::MAX);
    }

    #[test]
    fn test_snapshot_with_duplicate_ids_is_empty() {
        let raw = serde_json::to_string(&vec![item(1, 1), item(1, 2)]).unwrap();
        assert!(Cart::from_snapshot(Some(&raw)).is_empty());
    }
}
