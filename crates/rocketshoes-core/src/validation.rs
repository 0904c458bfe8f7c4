//! # Stock Rules
//!
//! Availability checks run by the cart store before any mutation.
//!
//! ## Two Comparisons
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Availability                                 │
//! │                                                                         │
//! │  add_product (item already in cart)                                    │
//! │  ├── needs headroom for ONE more unit                                  │
//! │  └── rejected when stock <= current amount                             │
//! │                                                                         │
//! │  update_product_amount                                                 │
//! │  ├── needs the requested amount in full                                │
//! │  └── rejected when stock < requested amount                            │
//! │                                                                         │
//! │  A fresh add (item not yet in cart) is not stock-checked.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, ProductId, StockLevel};

/// Checks that one more unit of an existing line item can be added.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::{CatalogProduct, LineItem, StockLevel};
/// use rocketshoes_core::validation::check_increment;
///
/// let mut item = LineItem::from_catalog(CatalogProduct::new(1, "Runner", 99.9, "r.jpg"));
/// item.amount = 5;
///
/// assert!(check_increment(&item, StockLevel::new(6)).is_ok());
/// assert!(check_increment(&item, StockLevel::new(5)).is_err());
/// ```
pub fn check_increment(item: &LineItem, stock: StockLevel) -> CoreResult<()> {
    if stock.amount <= item.amount {
        return Err(CoreError::InsufficientStock {
            product_id: item.id,
            available: stock.amount,
            requested: item.amount.saturating_add(1),
        });
    }
    Ok(())
}

/// Checks that `requested` units are available.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::StockLevel;
/// use rocketshoes_core::validation::check_requested;
///
/// assert!(check_requested(1, 3, StockLevel::new(3)).is_ok());
/// assert!(check_requested(1, 4, StockLevel::new(3)).is_err());
/// ```
pub fn check_requested(product_id: ProductId, requested: i64, stock: StockLevel) -> CoreResult<()> {
    if stock.amount < requested {
        return Err(CoreError::InsufficientStock {
            product_id,
            available: stock.amount,
            requested,
        });
    }
    Ok(())
}

/// Whether an update request should be acted on at all.
///
/// Non-positive amounts are ignored silently, not reported.
#[inline]
pub fn is_actionable_amount(amount: i64) -> bool {
    amount > 0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogProduct;

    fn item_with_amount(amount: i64) -> LineItem {
        let mut item = LineItem::from_catalog(CatalogProduct::new(4, "Court", 120.0, "c.jpg"));
        item.amount = amount;
        item
    }

    #[test]
    fn test_increment_needs_headroom() {
        assert!(check_increment(&item_with_amount(2), StockLevel::new(5)).is_ok());
        assert!(check_increment(&item_with_amount(4), StockLevel::new(5)).is_ok());
        assert!(check_increment(&item_with_amount(5), StockLevel::new(5)).is_err());
        assert!(check_increment(&item_with_amount(6), StockLevel::new(5)).is_err());
    }

    #[test]
    fn test_increment_error_details() {
        let err = check_increment(&item_with_amount(5), StockLevel::new(5)).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => {
                assert_eq!(product_id, 4);
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_increment_at_max_amount_does_not_overflow() {
        let err = check_increment(&item_with_amount(i64::MAX), StockLevel::new(5)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                requested: i64::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_requested_allows_exact_stock() {
        assert!(check_requested(1, 10, StockLevel::new(10)).is_ok());
        assert!(check_requested(1, 4, StockLevel::new(3)).is_err());
        assert!(check_requested(1, 1, StockLevel::new(0)).is_err());
    }

    #[test]
    fn test_actionable_amount() {
        assert!(is_actionable_amount(1));
        assert!(!is_actionable_amount(0));
        assert!(!is_actionable_amount(-1));
    }
}
