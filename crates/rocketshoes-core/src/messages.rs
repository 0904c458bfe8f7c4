//! User-facing notification messages.
//!
//! These strings are matched verbatim by UI snapshot tests. Do not reword.

/// Stock exhaustion, on add and on quantity update.
pub const STOCK_EXCEEDED: &str = "requested quantity exceeds stock";

/// Generic failure of `add_product`.
pub const ADD_FAILED: &str = "failed to add product";

/// Generic failure of `remove_product`.
pub const REMOVE_FAILED: &str = "failed to remove product";

/// Generic failure of `update_product_amount`.
pub const UPDATE_FAILED: &str = "failed to change product quantity";
