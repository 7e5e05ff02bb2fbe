//! HTTP handlers for the server.

pub mod auth;
pub mod forms;
pub mod qrcode;
pub mod responses;
pub mod stats;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Map a store failure to the generic service-level error response.
pub(crate) fn server_error(e: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    eprintln!("[server] request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Server error"})),
    )
}
