//! # Selectors
//!
//! Derived read queries over [`CartState`].
//!
//! Selectors are plain functions (or closures returned by functions) of
//! `&CartState`, so the same value can be read directly or handed to a
//! store subscription that re-evaluates it after each change:
//!
//! ```rust
//! use shopfront_core::selectors::{select_count, select_is_in_cart};
//! use shopfront_core::{CartState, Money, Product, ProductId};
//!
//! let cart: CartState = [Product::new(ProductId(9), "Scarf", Money::from_cents(1800))]
//!     .into_iter()
//!     .collect();
//!
//! let in_cart = select_is_in_cart(ProductId(9));
//! assert!(in_cart(&cart));
//! assert_eq!(select_count(&cart), 1);
//! ```

use crate::cart::CartState;
use crate::types::{Product, ProductId, Quantity};

/// The full ordered product list.
pub fn select_products(state: &CartState) -> Vec<Product> {
    state.products().to_vec()
}

/// Number of distinct lines in the cart (not the sum of quantities).
pub fn select_count(state: &CartState) -> usize {
    state.len()
}

/// Membership check for one product id.
pub fn select_is_in_cart(id: ProductId) -> impl Fn(&CartState) -> bool + Send + Sync + 'static {
    move |state| state.contains(id)
}

/// A single cart line, if present.
pub fn select_product(id: ProductId) -> impl Fn(&CartState) -> Option<Product> + Send + Sync + 'static {
    move |state| state.get(id).cloned()
}

/// Quantity of a single line, if present.
pub fn select_quantity(id: ProductId) -> impl Fn(&CartState) -> Option<Quantity> + Send + Sync + 'static {
    move |state| state.get(id).map(|p| p.quantity)
}
