//! # Notifications
//!
//! Turns [`CartEvent`]s into user-facing notifications and fans them out to
//! sinks (toast layer, logs, tests).
//!
//! ```text
//! ┌──────────────┐   CartEvent    ┌──────────────┐  Notification  ┌──────────────┐
//! │  CartState   │ ─────────────► │  CartStore   │ ─────────────► │ Notification │
//! │  (pure)      │  ProductAdded  │  + settings  │  Success,      │    Sink(s)   │
//! └──────────────┘                └──────────────┘  "Added to     └──────────────┘
//!                                                     cart"
//! ```

use serde::{Deserialize, Serialize};
use shopfront_core::CartEvent;
use tracing::info;
use ts_rs::TS;

use crate::config::NotificationSettings;

/// Severity of a notification, mirroring the toast variants of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// The notification a cart event should raise, if any.
    pub fn for_event(event: &CartEvent, settings: &NotificationSettings) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        match event {
            CartEvent::ProductAdded { .. } => Some(Notification::success(&settings.added_message)),
        }
    }
}

/// Receiver of notifications, e.g. the bridge to the UI's toast layer.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Sink that writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(level = ?notification.level, message = %notification.message, "Notification");
    }
}
