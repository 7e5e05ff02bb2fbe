//! QR code generation handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::qr;

use super::super::state::AppState;

/// Request body for QR generation.
#[derive(Debug, Deserialize)]
pub struct QrCodeRequest {
    pub form_code: String,
    /// Full URL to encode; defaults to `{public_url}/form/{form_code}`.
    #[serde(default)]
    pub form_url: Option<String>,
    /// Optional logo as a data URI; decode failure degrades to a plain code.
    #[serde(default)]
    pub logo_data: Option<String>,
}

/// POST /api/qrcode - render a shareable QR code as a PNG data URI.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QrCodeRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let url = req.form_url.unwrap_or_else(|| {
        format!(
            "{}/form/{}",
            state.config.public_url.trim_end_matches('/'),
            req.form_code
        )
    });

    // Matrix encoding plus PNG work is CPU-bound; keep it off the async
    // worker threads.
    let logo_data = req.logo_data;
    let result =
        tokio::task::spawn_blocking(move || qr::generate(&url, logo_data.as_deref())).await;

    match result {
        Ok(Ok(data_uri)) => Ok(Json(json!({"qrcode": data_uri}))),
        Ok(Err(e)) => {
            eprintln!("[qr] generation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("QR generation failed: {}", e)})),
            ))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Task error: {}", e)})),
        )),
    }
}
