//! # routes::indicators
//!
//! `GET /api/indicators?period=24h`: volume / revenue rows for the
//! performance view, plus totals.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    engine::indicators::{indicator_rows, VolumePeriod},
    state::SharedState,
};

#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    #[serde(default)]
    pub period: VolumePeriod,
}

pub async fn get_indicators(
    State(state):  State<SharedState>,
    Query(query):  Query<IndicatorQuery>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    let rows  = indicator_rows(store.services(), query.period);

    let total_volume: f64  = rows.iter().filter_map(|r| r.volume).sum();
    let total_revenue: f64 = rows.iter().map(|r| r.estimated_revenue).sum();

    Json(json!({
        "ok":            true,
        "period":        query.period,
        "periods":       VolumePeriod::ALL,
        "total_volume":  total_volume,
        "total_revenue": total_revenue,
        "rows":          rows,
    }))
}
