//! # shopfront-core: Pure Cart Logic for Shopfront
//!
//! This crate is the **heart** of the Shopfront cart. It contains the cart
//! state machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront Cart Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Front-end                                │   │
//! │  │    Product Card ──► Cart Badge ──► Cart Drawer ──► Toasts       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON actions / subscriptions          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shopfront-store                              │   │
//! │  │    dispatch, subscribe, notification sinks, config              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ selectors │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │  count    │  │   │
//! │  │   │ Quantity  │  │           │  │CartAction │  │ isInCart  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO TOASTS • PURE TRANSITIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, Quantity, Rating)
//! - [`money`] - Money type with integer minor units
//! - [`cart`] - Cart state, actions, events and transitions
//! - [`selectors`] - Derived read queries over the cart
//! - [`error`] - Domain error types
//! - [`validation`] - Product validation at the front-end boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{CartState, Money, Product, ProductId};
//! use shopfront_core::selectors::{select_count, select_is_in_cart};
//!
//! let mut cart = CartState::new();
//! let shoes = Product::new(ProductId(1), "Running Shoes", Money::from_cents(8999));
//!
//! let transition = cart.add_to_cart(shoes.clone());
//! assert!(transition.changed);
//! assert_eq!(transition.events.len(), 1);
//!
//! // Adding the same product again is a silent no-op
//! let again = cart.add_to_cart(shoes);
//! assert!(!again.changed);
//! assert!(again.events.is_empty());
//!
//! assert_eq!(select_count(&cart), 1);
//! assert!(select_is_in_cart(ProductId(1))(&cart));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod selectors;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, CartAction, CartEvent, CartState, Transition};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in bytes.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of an image reference (URL or asset path), in bytes.
pub const MAX_IMAGE_LENGTH: usize = 2048;

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;
