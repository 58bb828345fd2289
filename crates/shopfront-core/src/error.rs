//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Boundary failures (bad JSON, bad product)      │
//! │  └── ValidationError  - Product field validation failures              │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                               │
//! │  └── StoreError       - Config and serialization failures              │
//! │                                                                         │
//! │  Cart transitions themselves NEVER fail. Unknown ids, duplicate adds   │
//! │  and quantity floors are no-ops, not errors.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning front-end input into cart actions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The action JSON could not be decoded.
    ///
    /// ## When This Occurs
    /// - Unknown action `type` (e.g. `"cart/addToWishlist"`)
    /// - Missing payload fields
    /// - A product with `quantity: 0`
    #[error("Invalid cart action: {0}")]
    InvalidAction(#[from] serde_json::Error),

    /// A product carried by an action failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Product validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
