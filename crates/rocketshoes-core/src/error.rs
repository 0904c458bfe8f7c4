//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  └── CoreError        - What the cart store reasons about              │
//! │                                                                         │
//! │  rocketshoes-db errors                                                 │
//! │  └── DbError          - SQLite failures      ──► CoreError::Storage... │
//! │                                                                         │
//! │  rocketshoes-api errors                                                │
//! │  └── ApiError         - HTTP failures        ──► CoreError::Lookup...  │
//! │                                                                         │
//! │  CartStore collapses every CoreError into one notification message     │
//! │  per operation; nothing is returned to the caller.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while running a cart operation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog or stock service has no record of the product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A remote lookup failed for any other reason (network, HTTP status,
    /// malformed payload).
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Reading or writing the persisted cart failed.
    #[error("Storage failed: {0}")]
    StorageFailed(String),

    /// Not enough stock to satisfy the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// update_product_amount(id: 7, amount: 4)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 7, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// Notifier: "requested quantity exceeds stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The targeted line item is not in the cart.
    #[error("Product {0} not in cart")]
    NotInCart(ProductId),

    /// The cart could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates a LookupFailed error from anything displayable.
    pub fn lookup(message: impl Into<String>) -> Self {
        CoreError::LookupFailed(message.into())
    }

    /// Creates a StorageFailed error from anything displayable.
    pub fn storage(message: impl Into<String>) -> Self {
        CoreError::StorageFailed(message.into())
    }

    /// True for the business-rule rejection tier (as opposed to faults).
    pub fn is_stock_exhaustion(&self) -> bool {
        matches!(self, CoreError::InsufficientStock { .. })
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 7,
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 3, requested 4"
        );
        assert_eq!(CoreError::NotInCart(2).to_string(), "Product 2 not in cart");
    }

    #[test]
    fn test_stock_exhaustion_tier() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            available: 0,
            requested: 1,
        };
        assert!(err.is_stock_exhaustion());
        assert!(!CoreError::lookup("timeout").is_stock_exhaustion());
        assert!(!CoreError::NotInCart(1).is_stock_exhaustion());
    }

    #[test]
    fn test_serde_error_converts() {
        let json_err = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::Serialization(_)));
    }
}
