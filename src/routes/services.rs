//! # routes::services
//!
//! Read/write surface used by the summary and configurator views.
//!
//! | Method | Path                          | Description                         |
//! |--------|-------------------------------|-------------------------------------|
//! | GET    | `/api/services`               | All services, seed order            |
//! | GET    | `/api/services/:id`           | One service                         |
//! | PUT    | `/api/services/:id/margin`    | Set one side's margin               |
//! | PUT    | `/api/services/:id/margins`   | Save buy + sell margins together    |
//! | POST   | `/api/services/:id/restore`   | Restore seed defaults               |
//! | GET    | `/api/services/:id/preview`   | Quote margins without committing    |

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    error::AppError,
    events::WsEvent,
    models::{MarginSide, Service},
    state::SharedState,
};

// ─── Bodies ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetMarginBody {
    pub side:  MarginSide,
    pub value: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyMarginsBody {
    pub buy:   f64,
    pub sell:  f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub buy:  Option<f64>,
    pub sell: Option<f64>,
}

// ─── GET /api/services ────────────────────────────────────────────────────────

pub async fn list_services(State(state): State<SharedState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(json!({
        "ok":       true,
        "count":    store.services().len(),
        "bounds":   store.bounds(),
        "services": store.services(),
    }))
}

// ─── GET /api/services/:id ────────────────────────────────────────────────────

pub async fn get_service(
    State(state): State<SharedState>,
    Path(id):     Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.read().await;
    let service = store.get(&id)?;
    Ok(Json(json!({ "ok": true, "service": service })))
}

// ─── PUT /api/services/:id/margin ─────────────────────────────────────────────

pub async fn set_margin(
    State(state): State<SharedState>,
    Path(id):     Path<String>,
    Json(body):   Json<SetMarginBody>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.store.write().await;
    let service   = store.set_margin(&id, body.side, body.value, body.notes)?;

    Ok(committed(&state, service))
}

// ─── PUT /api/services/:id/margins ────────────────────────────────────────────

pub async fn apply_margins(
    State(state): State<SharedState>,
    Path(id):     Path<String>,
    Json(body):   Json<ApplyMarginsBody>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.store.write().await;
    let service   = store.apply_margins(&id, body.buy, body.sell, body.notes)?;

    info!(service = %id, buy = body.buy, sell = body.sell, "💾 Margins saved");
    Ok(committed(&state, service))
}

// ─── POST /api/services/:id/restore ───────────────────────────────────────────

pub async fn restore_defaults(
    State(state): State<SharedState>,
    Path(id):     Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.store.write().await;
    let service   = store.restore_defaults(&id)?;

    Ok(committed(&state, service))
}

// ─── GET /api/services/:id/preview ────────────────────────────────────────────

/// Missing `buy` / `sell` default to the service's current margins.
pub async fn preview_margins(
    State(state):  State<SharedState>,
    Path(id):      Path<String>,
    Query(query):  Query<PreviewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let store   = state.store.read().await;
    let current = store.get(&id)?;
    let buy     = query.buy.unwrap_or(current.buy_margin());
    let sell    = query.sell.unwrap_or(current.sell_margin());

    let preview = store.preview(&id, buy, sell)?;
    Ok(Json(json!({ "ok": true, "preview": preview })))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Must run while the write guard is held, so `SERVICE_UPDATED` frames leave
/// in commit order.
fn committed(state: &SharedState, service: Service) -> Json<serde_json::Value> {
    state.broadcast(&WsEvent::ServiceUpdated {
        service: Box::new(service.clone()),
    });

    Json(json!({ "ok": true, "service": service }))
}
