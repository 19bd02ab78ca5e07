//! # state
//!
//! The shared application state injected into every Axum handler.
//!
//! * `Arc<AppState>` is cloned cheaply into handlers via
//!   `axum::extract::State`.
//! * The store sits behind a `tokio::sync::RwLock`: many views may read at
//!   once, and each mutation holds the write guard until its derived fields
//!   and audit entry are in place, so the next reader sees the whole edit.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::config::Config;
use crate::events::{BroadcastNotifier, WsEvent};
use crate::models::ServiceSeed;
use crate::store::{FixedIdentity, ServiceStore, StoreError};

// ─── AppState ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    /// The authoritative service collection.
    pub store: Arc<RwLock<ServiceStore>>,

    /// Pre-serialised [`WsEvent`]s for WebSocket clients.
    pub broadcast_tx: broadcast::Sender<String>,

    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: &Config, seeds: Vec<ServiceSeed>) -> Result<Self, StoreError> {
        let (broadcast_tx, _) = broadcast::channel(config.notify_capacity);

        let store = ServiceStore::new(
            seeds,
            Arc::new(FixedIdentity(config.operator.clone())),
            Arc::new(BroadcastNotifier::new(broadcast_tx.clone())),
        )?;

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            broadcast_tx,
            started_at: chrono::Utc::now(),
        })
    }

    /// Send an event to every WebSocket client. Never fails: having no
    /// listener is normal when no dashboard is open.
    pub fn broadcast(&self, event: &WsEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }
}

pub type SharedState = Arc<AppState>;

pub fn build_state(config: &Config, seeds: Vec<ServiceSeed>) -> Result<SharedState, StoreError> {
    Ok(Arc::new(AppState::new(config, seeds)?))
}
