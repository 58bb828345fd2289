//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Front-end     │  │  Configuration  │  │     Serialization       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core           │  │  InvalidConfig  │  │  Serialization          │ │
//! │  │  (bad action,   │  │  Io             │  │  (state -> JSON)        │ │
//! │  │   bad product)  │  │  Toml           │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Dispatching a decoded CartAction never errors.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised at the edges of the store.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Front-end Errors
    // =========================================================================
    /// The front-end sent an action that could not be decoded or validated.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are inconsistent.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to load config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::StoreConfig`].
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// Cart state could not be encoded.
    #[error("Failed to serialize cart state: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}
