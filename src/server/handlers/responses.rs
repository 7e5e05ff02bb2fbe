//! Response submission and listing handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::notify::ResponseEvent;

use super::super::state::AppState;
use super::server_error;

/// Request body for response submission.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub form_code: String,
    pub response_data: Value,
}

/// POST /api/responses - submit a response to a form.
///
/// The notification task is spawned only after the response row has been
/// committed, and never blocks or fails the request.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if !req.response_data.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "response_data must be an object"})),
        ));
    }

    // Scope the lock: commit the row, gather what the notification needs,
    // release before dispatch.
    let (receipt, event) = {
        let store = state.store.lock().await;

        let form = match store.form_by_code(&req.form_code) {
            Ok(Some(form)) => form,
            Ok(None) => {
                return Err((
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "Form not found"})),
                ));
            }
            Err(e) => return Err(server_error(e)),
        };

        let receipt = store
            .insert_response(form.id, &req.response_data)
            .map_err(server_error)?;

        let owner_email = store
            .user_email(form.user_id)
            .map_err(server_error)?
            .unwrap_or_default();

        let event = ResponseEvent {
            owner_email,
            form_title: form.title,
            response_data: req.response_data,
        };

        (receipt, event)
    };

    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        notifier.notify_response(event).await;
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Response submitted", "response": receipt})),
    ))
}

/// GET /api/responses/form/:form_id - list responses, newest first.
pub async fn list_for_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.lock().await;
    match store.responses_for_form(form_id) {
        Ok(responses) => Ok(Json(json!({"responses": responses}))),
        Err(e) => Err(server_error(e)),
    }
}
