//! Aggregate statistics handler.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::super::state::AppState;
use super::server_error;

/// GET /api/stats/:form_id - total responses plus per-day counts for the
/// last 7 days.
pub async fn for_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.lock().await;
    match store.response_stats(form_id) {
        Ok(stats) => Ok(Json(json!({
            "total": stats.total,
            "daily_stats": stats.daily_stats,
        }))),
        Err(e) => Err(server_error(e)),
    }
}
