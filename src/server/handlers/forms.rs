//! Form CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::store::{Form, NewForm};

use super::super::state::AppState;
use super::server_error;

/// Length of generated share codes (matches an 8-byte URL-safe token).
const FORM_CODE_LEN: usize = 11;

/// A single field of a form definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Request body for form creation.
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub logo_data: Option<String>,
}

/// The subset of a form exposed to respondents. Omits the owner.
#[derive(Debug, Serialize)]
pub struct PublicForm {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub fields: Value,
    pub logo_data: Option<String>,
}

impl From<Form> for PublicForm {
    fn from(form: Form) -> Self {
        Self {
            id: form.id,
            title: form.title,
            description: form.description,
            fields: form.fields,
            logo_data: form.logo_data,
        }
    }
}

/// Generate a random URL-safe share code.
fn new_form_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(FORM_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Validate a creation request before it reaches the store.
fn validate(req: &CreateFormRequest) -> Result<(), &'static str> {
    if req.title.trim().is_empty() {
        return Err("Title required");
    }
    if req.fields.iter().any(|f| f.label.trim().is_empty()) {
        return Err("Field labels must not be empty");
    }
    Ok(())
}

/// POST /api/forms - create a form with a fresh share code.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if let Err(msg) = validate(&req) {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": msg}))));
    }

    let new_form = NewForm {
        user_id: req.user_id,
        title: req.title.trim().to_string(),
        description: req.description,
        form_code: new_form_code(),
        fields: serde_json::to_value(&req.fields).unwrap_or(Value::Array(Vec::new())),
        logo_data: req.logo_data,
    };

    let store = state.store.lock().await;
    match store.create_form(&new_form) {
        Ok(form) => Ok((StatusCode::CREATED, Json(json!({"form": form})))),
        Err(e) => Err(server_error(e)),
    }
}

/// GET /api/forms/user/:user_id - list a user's forms with response counts.
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.lock().await;
    match store.forms_for_user(user_id) {
        Ok(forms) => Ok(Json(json!({"forms": forms}))),
        Err(e) => Err(server_error(e)),
    }
}

/// GET /api/forms/:form_code - public lookup by share code.
pub async fn get_by_code(
    State(state): State<Arc<AppState>>,
    Path(form_code): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.lock().await;
    match store.form_by_code(&form_code) {
        Ok(Some(form)) => Ok(Json(json!({"form": PublicForm::from(form)}))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Form not found", "form_code": form_code})),
        )),
        Err(e) => Err(server_error(e)),
    }
}

/// DELETE /api/forms/:form_id - delete a form; responses cascade.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.lock().await;
    match store.delete_form(form_id) {
        Ok(true) => Ok(Json(json!({"message": "Form deleted"}))),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Form not found"})),
        )),
        Err(e) => Err(server_error(e)),
    }
}
