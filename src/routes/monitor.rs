//! # routes::monitor
//!
//! Live feed and health for the dashboard.
//!
//! | Method    | Path           | Description                                |
//! |-----------|----------------|--------------------------------------------|
//! | GET (WS)  | `/ws/monitor`  | Snapshot, then notifications + updates     |
//! | GET       | `/api/health`  | Service count, listeners, uptime           |

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Json,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::state::SharedState;

// ─── WebSocket Handler ────────────────────────────────────────────────────────

/// Upgrade to WebSocket and subscribe to the broadcast channel. Every
/// [`WsEvent`](crate::events::WsEvent) arrives as one JSON text frame.
pub async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // Subscribe before the snapshot so no change slips between the two.
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 WebSocket client connected");

    let snapshot = {
        let store = state.store.read().await;
        json!({
            "event":    "SNAPSHOT",
            "services": store.services(),
        })
        .to_string()
    };

    if sender.send(Message::Text(snapshot)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("WS client lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 WebSocket client disconnected");
}

// ─── GET /api/health ──────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let services = state.store.read().await.services().len();
    let uptime   = chrono::Utc::now().signed_duration_since(state.started_at);

    Json(json!({
        "ok":          true,
        "services":    services,
        "listeners":   state.broadcast_tx.receiver_count(),
        "uptime_secs": uptime.num_seconds(),
    }))
}
