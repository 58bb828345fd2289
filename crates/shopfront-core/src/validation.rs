//! # Validation Module
//!
//! Product validation for data arriving from the front-end.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization                                              │
//! │  ├── Field types, camelCase names                                      │
//! │  └── Quantity >= 1 (Quantity rejects 0 on decode)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (shopfront-store calls it in dispatch_json)      │
//! │  ├── Name present and not too long                                     │
//! │  ├── Prices not negative                                               │
//! │  └── Rating within 0.0-5.0                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart transitions                                             │
//! │  └── Total functions, no validation, no errors                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_product, validate_product_name};
//! use shopfront_core::{Money, Product, ProductId};
//!
//! assert!(validate_product_name("Linen Shirt").is_ok());
//! assert!(validate_product_name("   ").is_err());
//!
//! let shirt = Product::new(ProductId(4), "Linen Shirt", Money::from_cents(3900));
//! assert!(validate_product(&shirt).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, Rating};
use crate::{MAX_IMAGE_LENGTH, MAX_NAME_LENGTH, MAX_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most 200 bytes after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an image reference. Empty is allowed (placeholder image).
pub fn validate_image(image: &str) -> ValidationResult<()> {
    if image.len() > MAX_IMAGE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "image".to_string(),
            max: MAX_IMAGE_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a rating: finite and within 0.0-5.0 inclusive.
pub fn validate_rating(rating: Rating) -> ValidationResult<()> {
    let value = rating.value();
    if !value.is_finite() || !(0.0..=MAX_RATING).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0.0,
            max: f64::from(MAX_RATING),
        });
    }
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a product, returning the first failure.
///
/// Quantity is not checked here: the `Quantity` type cannot hold zero.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price("price", product.price)?;
    validate_price("originalPrice", product.original_price)?;
    validate_image(&product.image)?;
    validate_rating(product.rating)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
