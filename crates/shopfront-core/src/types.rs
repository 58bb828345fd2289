//! # Domain Types
//!
//! Core domain types for cart line items.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Product        │   │    ProductId    │   │    Quantity     │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id: ProductId      │   │  i64, unique    │   │  u32, >= 1      │   │
//! │  │  name               │   │  within a cart  │   │  never zero     │   │
//! │  │  price: Money       │   └─────────────────┘   └─────────────────┘   │
//! │  │  original_price     │                                                │
//! │  │  image              │   ┌─────────────────┐                          │
//! │  │  rating: Rating     │   │     Rating      │                          │
//! │  │  quantity: Quantity │   │  f32, 0.0-5.0   │                          │
//! │  └─────────────────────┘   └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Products cross the front-end boundary as camelCase JSON:
//! ```json
//! { "id": 7, "name": "Denim Jacket", "price": 49.99, "originalPrice": 69.99,
//!   "image": "/img/jacket.png", "rating": 4.5, "quantity": 1 }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Unique within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// How many units of a product sit in the cart.
///
/// ## Invariant
/// A `Quantity` is always at least 1. The only way to get rid of a line is
/// to remove it; decrementing stops at 1.
///
/// ```rust
/// use shopfront_core::Quantity;
///
/// assert!(Quantity::new(0).is_err());
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
/// assert_eq!(Quantity::ONE.decremented(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting zero.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        Ok(Quantity(value))
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// One more unit, or `None` if the count would overflow.
    #[inline]
    pub fn incremented(self) -> Option<Self> {
        self.0.checked_add(1).map(Quantity)
    }

    /// One less unit, or `None` if already at the floor of 1.
    #[inline]
    pub fn decremented(self) -> Option<Self> {
        if self.0 > 1 {
            Some(Quantity(self.0 - 1))
        } else {
            None
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u32::deserialize(deserializer)?;
        Quantity::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Average review score shown on the product card (0.0 to 5.0).
///
/// Range is checked by [`crate::validation::validate_rating`], not on
/// construction, so catalog data with odd values still decodes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating(pub f32);

impl Rating {
    #[inline]
    pub const fn value(&self) -> f32 {
        self.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as it sits in the cart: catalog data plus a quantity.
///
/// ## Design Notes
/// The whole catalog record is copied into the cart when added, so the cart
/// drawer renders without looking anything up. Only `quantity` ever changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Current unit price.
    pub price: Money,

    /// Price before any markdown (shown struck through).
    pub original_price: Money,

    /// Image URL or asset path.
    pub image: String,

    /// Average review score.
    pub rating: Rating,

    /// Units in the cart.
    pub quantity: Quantity,
}

impl Product {
    /// Creates a product with a single unit, no markdown, no image and no
    /// rating.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            original_price: price,
            image: String::new(),
            rating: Rating::default(),
            quantity: Quantity::ONE,
        }
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = original_price;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Rating(rating);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
