//! # events
//!
//! [`WsEvent`]: everything pushed to dashboard clients over `/ws/monitor`.
//!
//! Events travel through a `tokio::sync::broadcast::Sender<String>` already
//! serialised to JSON, so the channel has no `Clone` bound on domain types.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::models::{Notification, Service};
use crate::store::Notifier;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// Toast for the operator after a margin edit or restore.
    Notification {
        title:       String,
        description: String,
    },

    /// Full new state of a service after a committed change.
    ServiceUpdated {
        service: Box<Service>,
    },
}

impl WsEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}

impl From<&Notification> for WsEvent {
    fn from(n: &Notification) -> Self {
        WsEvent::Notification {
            title:       n.title.clone(),
            description: n.description.clone(),
        }
    }
}

// ─── Broadcast Notifier ───────────────────────────────────────────────────────

/// Store [`Notifier`] that forwards notifications to WebSocket clients.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<String>,
}

impl BroadcastNotifier {
    pub fn new(tx: broadcast::Sender<String>) -> Self {
        Self { tx }
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: &Notification) {
        // Err only means nobody is listening right now.
        if self.tx.send(WsEvent::from(notification).to_json()).is_err() {
            trace!(title = %notification.title, "No WebSocket listeners for notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_reaches_subscriber() {
        let (tx, mut rx) = broadcast::channel(8);
        let notifier = BroadcastNotifier::new(tx);

        notifier.notify(&Notification::defaults_restored("Solana (SOL)"));

        let frame: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["event"], "NOTIFICATION");
        assert_eq!(frame["title"], "Defaults restored");
    }

    #[test]
    fn test_no_listener_does_not_panic() {
        let (tx, rx) = broadcast::channel::<String>(8);
        drop(rx);
        BroadcastNotifier::new(tx).notify(&Notification::defaults_restored("x"));
    }
}
