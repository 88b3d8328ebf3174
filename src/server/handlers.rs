//! HTTP handlers for students, credentials and health
//!
//! Handlers are thin: they parse the request, call the [`RecordStore`] or the
//! [`AuthProvider`], and let [`RecordError`] render failures.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::auth::{AuthContext, AuthProvider};
use crate::core::error::{RecordError, StoreResult};
use crate::core::record::StudentRecord;
use crate::core::store::RecordStore;
use crate::core::validation::JsonPayload;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(store: RecordStore, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }
}

/// Path ids that are not integers address no student
fn parse_id(raw: &str) -> StoreResult<i64> {
    raw.parse::<i64>().map_err(|_| RecordError::NotFound {
        entity: "Student",
        key: raw.to_string(),
    })
}

/// Pull `username` and `password` out of a login/register body
fn credentials(payload: &Value) -> StoreResult<(&str, &str)> {
    let field = |name: &str| payload.get(name).and_then(Value::as_str);
    match (field("username"), field("password")) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(RecordError::malformed("Username and password are required")),
    }
}

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

fn with_cookie(mut response: Response, cookie: Option<String>) -> StoreResult<Response> {
    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| anyhow::anyhow!("Invalid Set-Cookie value: {}", e))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// GET /students
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRecord>>, RecordError> {
    Ok(Json(state.store.list_students().await?))
}

/// GET /students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentRecord>, RecordError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_student(id).await?))
}

/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<StudentRecord>), RecordError> {
    let record = state.store.create_student(&payload).await?;
    tracing::info!(
        student_id = record.id,
        user = context.username().unwrap_or("anonymous"),
        "student created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(context): Extension<AuthContext>,
    payload: Result<JsonPayload, RecordError>,
) -> Result<Json<StudentRecord>, RecordError> {
    let id = parse_id(&id)?;
    // A missing student outranks a malformed body
    let JsonPayload(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            state.store.get_student(id).await?;
            return Err(rejection);
        }
    };
    let record = state.store.update_student(id, &payload).await?;
    tracing::info!(
        student_id = id,
        user = context.username().unwrap_or("anonymous"),
        "student updated"
    );
    Ok(Json(record))
}

/// DELETE /students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Value>, RecordError> {
    let id = parse_id(&id)?;
    state.store.delete_student(id).await?;
    tracing::info!(
        student_id = id,
        user = context.username().unwrap_or("anonymous"),
        "student deleted"
    );
    Ok(message("Student deletion successful"))
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Value>), RecordError> {
    let (username, password) = credentials(&payload)?;
    state.store.register(username, password).await?;
    Ok((StatusCode::CREATED, message("User registered successfully")))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Response, RecordError> {
    let (username, password) = credentials(&payload)?;
    state.store.authenticate(username, password).await?;

    let grant = state.auth.login(username).await?;
    tracing::info!(username, provider = state.auth.name(), "login successful");

    let body = match grant.token {
        Some(token) => json!({ "message": "Login successful", "token": token }),
        None => json!({ "message": "Login successful" }),
    };
    with_cookie(Json(body).into_response(), grant.set_cookie)
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, RecordError> {
    let cookie = state.auth.logout(&headers).await?;
    tracing::info!(provider = state.auth.name(), "logout");
    with_cookie(message("Logout successful").into_response(), cookie)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
