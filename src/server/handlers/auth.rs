//! Account registration and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::store;

use super::super::state::AppState;
use super::server_error;

/// Request body for both auth endpoints.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/register - create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email and password required"})),
        ));
    }

    let hash = store::hash_password(&req.password);
    let store = state.store.lock().await;

    match store.create_user(email, &hash) {
        Ok(Some(user)) => Ok((StatusCode::CREATED, Json(json!({"user": user})))),
        Ok(None) => Err((
            StatusCode::CONFLICT,
            Json(json!({"error": "Email already exists"})),
        )),
        Err(e) => Err(server_error(e)),
    }
}

/// POST /api/auth/login - check credentials.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let hash = store::hash_password(&req.password);
    let store = state.store.lock().await;

    match store.authenticate(req.email.trim(), &hash) {
        Ok(Some(user)) => Ok(Json(json!({"user": user}))),
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )),
        Err(e) => Err(server_error(e)),
    }
}
