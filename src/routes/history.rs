//! # routes::history
//!
//! Audit log for the history view.
//!
//! | Method | Path                  | Description                                  |
//! |--------|-----------------------|----------------------------------------------|
//! | GET    | `/api/history`        | All changes, newest first (`?service=&user=`)|
//! | GET    | `/api/history/users`  | Distinct users, for the filter box           |

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    engine::history::{collect, users, HistoryFilter},
    state::SharedState,
};

/// GET /api/history
pub async fn get_history(
    State(state):   State<SharedState>,
    Query(filter):  Query<HistoryFilter>,
) -> impl IntoResponse {
    let store   = state.store.read().await;
    let records = collect(store.services(), &filter);

    Json(json!({
        "ok":      true,
        "count":   records.len(),
        "records": records,
    }))
}

/// GET /api/history/users
pub async fn get_history_users(State(state): State<SharedState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(json!({ "ok": true, "users": users(store.services()) }))
}
