//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_NOTIFICATIONS=off                                        │
//! │     SHOPFRONT_ADDED_MESSAGE="Added to bag"                             │
//! │     SHOPFRONT_LOG=debug                                                │
//! │                                                                         │
//! │  2. TOML Config File (path passed to `load`)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     notifications on, "Added to cart", info,shopfront=debug            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [notifications]
//! enabled = true
//! added_message = "Added to cart"
//!
//! [logging]
//! filter = "info,shopfront=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Message shown when a new product lands in the cart.
pub const DEFAULT_ADDED_MESSAGE: &str = "Added to cart";

/// Log filter used when neither `RUST_LOG` nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,shopfront=debug";

// =============================================================================
// Notification Settings
// =============================================================================

/// Controls the toasts raised by cart transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Deliver notifications to sinks at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Text of the success notification for a new cart line.
    #[serde(default = "default_added_message")]
    pub added_message: String,
}

fn default_true() -> bool {
    true
}

fn default_added_message() -> String {
    DEFAULT_ADDED_MESSAGE.to_string()
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            enabled: true,
            added_message: default_added_message(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` still wins.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml_str(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.notifications.added_message.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "notifications.added_message must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SHOPFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup("SHOPFRONT_NOTIFICATIONS") {
            match parse_flag(&flag) {
                Some(enabled) => {
                    debug!(enabled, "Overriding notifications from environment");
                    self.notifications.enabled = enabled;
                }
                None => warn!(value = %flag, "Unknown SHOPFRONT_NOTIFICATIONS value"),
            }
        }

        if let Some(message) = lookup("SHOPFRONT_ADDED_MESSAGE") {
            self.notifications.added_message = message;
        }

        if let Some(filter) = lookup("SHOPFRONT_LOG") {
            self.logging.filter = filter;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
