//! # Margin Desk — price-control backend
//!
//! Configure buy/sell margins per service, preview the resulting prices
//! against market averages, and audit every change.
//!
//! ```text
//!  ┌──────────────┐  PUT  /api/services/:id/margin   ┌──────────────────────────┐
//!  │  Dashboard   │ ───────────────────────────────▶ │ AppState                 │
//!  │  views       │  POST /api/services/:id/restore  │ └─ RwLock<ServiceStore>  │
//!  │              │                                  │     ├─ defaults (seed)   │
//!  │              │  GET  /api/services | history    │     ├─ services (live)   │
//!  │              │  GET  /api/indicators            │     └─ notifier ───────┐ │
//!  └──────────────┘                                  └────────────────────────┼─┘
//!         ▲                      ws://host/ws/monitor                         │
//!         └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing core (`engine::pricing`, `store`) has no I/O and can be used
//! without the HTTP layer.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{
    history::{get_history, get_history_users},
    indicators::get_indicators,
    monitor::{health_check, ws_monitor},
    services::{
        apply_margins, get_service, list_services, preview_margins, restore_defaults, set_margin,
    },
};
use state::SharedState;

/// Build the Axum router over an already-constructed state.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Services (summary + configurator) ─────────────────────────────────
        .route("/api/services",              get(list_services))
        .route("/api/services/:id",          get(get_service))
        .route("/api/services/:id/margin",   put(set_margin))
        .route("/api/services/:id/margins",  put(apply_margins))
        .route("/api/services/:id/restore",  post(restore_defaults))
        .route("/api/services/:id/preview",  get(preview_margins))
        // ── Indicators ────────────────────────────────────────────────────────
        .route("/api/indicators",            get(get_indicators))
        // ── History / audit ───────────────────────────────────────────────────
        .route("/api/history",               get(get_history))
        .route("/api/history/users",         get(get_history_users))
        // ── Monitor ───────────────────────────────────────────────────────────
        .route("/api/health",                get(health_check))
        .route("/ws/monitor",                get(ws_monitor))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
