//! # shopfront-store: The Owning Cart Store
//!
//! Wraps the pure cart logic from `shopfront-core` in a store that the web
//! front-end talks to.
//!
//! ## Store Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Architecture                                 │
//! │                                                                         │
//! │  ┌──────────────┐  dispatch / dispatch_json   ┌──────────────────────┐  │
//! │  │  Front-end   │ ──────────────────────────► │      CartStore       │  │
//! │  │  bridge      │ ◄────────────────────────── │  Mutex<CartState>    │  │
//! │  └──────────────┘  products / count / ...     └──────────┬───────────┘  │
//! │                                                          │              │
//! │          ┌───────────────────────┬───────────────────────┤              │
//! │          ▼                       ▼                       ▼              │
//! │  ┌──────────────┐      ┌──────────────────┐     ┌─────────────────┐    │
//! │  │  Listeners   │      │  watch channel   │     │ NotificationSink│    │
//! │  │ state / sel. │      │  latest CartState│     │ "Added to cart" │    │
//! │  └──────────────┘      └──────────────────┘     └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`: dispatch, reads, subscriptions
//! - [`subscription`] - listener registry
//! - [`notification`] - notifications and sinks
//! - [`config`] - `StoreConfig` loading (TOML + `SHOPFRONT_*` env)
//! - [`error`] - `StoreError`

pub mod config;
pub mod error;
pub mod notification;
pub mod store;
pub mod subscription;

pub use config::{LoggingSettings, NotificationSettings, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use notification::{Notification, NotificationLevel, NotificationSink, TracingNotifier};
pub use store::CartStore;
pub use subscription::SubscriptionId;

use tracing_subscriber::fmt::Formatter;
use tracing_subscriber::{reload, EnvFilter};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_store=trace` - Show trace for the store only
/// - Otherwise `default_filter` (see [`config::DEFAULT_LOG_FILTER`])
///
/// Call this before loading [`StoreConfig`] so config loading is logged,
/// then hand the configured filter to [`LogFilter::apply_config`].
///
/// Returns `None` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> Option<LogFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_filter_reloading();
    let handle = builder.reload_handle();

    builder.try_init().ok().map(|_| LogFilter { handle })
}

/// Swaps the active log filter after start-up.
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Formatter>,
}

impl LogFilter {
    /// Switches to the configured filter unless `RUST_LOG` is set.
    pub fn apply_config(&self, logging: &LoggingSettings) -> StoreResult<()> {
        if std::env::var_os("RUST_LOG").is_some() {
            return Ok(());
        }
        self.set(&logging.filter)
    }

    /// Replaces the active filter.
    pub fn set(&self, directives: &str) -> StoreResult<()> {
        let filter = EnvFilter::try_new(directives)
            .map_err(|e| StoreError::InvalidConfig(format!("logging.filter: {}", e)))?;

        self.handle
            .reload(filter)
            .map_err(|e| StoreError::InvalidConfig(format!("logging.filter: {}", e)))?;

        tracing::debug!(filter = directives, "Log filter applied");
        Ok(())
    }
}
