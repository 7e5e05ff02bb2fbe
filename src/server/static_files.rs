//! Static file serving for the frontend.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse},
};
use include_dir::{Dir, include_dir};
use serde_json::json;
use std::sync::Arc;

use super::state::AppState;

/// Embedded frontend distribution files.
static FRONTEND_DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend/dist");

/// Serve the index.html file with cache-busting parameters injected into
/// script/link tags.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match FRONTEND_DIST.get_file("index.html") {
        Some(file) => {
            let contents = String::from_utf8_lossy(file.contents());
            let cache_bust = format!("?v={}", state.boot_time);
            let busted = contents
                .replace(".js\"", &format!(".js{}\"", cache_bust))
                .replace(".css\"", &format!(".css{}\"", cache_bust));

            Html(busted).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Frontend not built").into_response(),
    }
}

/// Serve static assets from the assets directory.
pub async fn asset_handler(Path(path): Path<String>) -> impl IntoResponse {
    // Strip query params if present
    let clean_path = path.split('?').next().unwrap_or(&path);
    let file_path = format!("assets/{}", clean_path);

    match FRONTEND_DIST.get_file(&file_path) {
        Some(file) => {
            let mime = mime_guess::from_path(clean_path)
                .first_or_octet_stream()
                .to_string();
            // Set long cache headers since we use cache busting
            (
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
                ],
                file.contents().to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

/// Fallback for unmatched paths.
///
/// API misses get a JSON 404; paths that look like file requests get a plain
/// 404; everything else serves the SPA shell so client-side routing (e.g.,
/// `/form/DEMO123`) works on a direct visit.
pub async fn fallback_handler(State(state): State<Arc<AppState>>, uri: Uri) -> impl IntoResponse {
    let path = uri.path();

    if path.starts_with("/api/") {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response();
    }

    if path == "/favicon.ico" {
        return StatusCode::NO_CONTENT.into_response();
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    if last_segment.contains('.') && !last_segment.ends_with(".html") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    index_handler(State(state)).await.into_response()
}
