//! Typed error handling for the record store
//!
//! Every failure a caller can observe is one of a handful of expected
//! outcomes. Each maps to a fixed HTTP status so the REST layer can turn
//! it into a response without inspecting messages.
//!
//! # Error kinds
//!
//! - [`RecordError::Validation`]: one or more invalid fields (400)
//! - [`RecordError::NotFound`]: unknown student id or username (404)
//! - [`RecordError::Conflict`]: duplicate username on register (400)
//! - [`RecordError::Unauthorized`]: failed login or missing session/token (401)
//! - [`RecordError::Storage`]: backend failure (500)
//!
//! # Example
//!
//! ```rust,ignore
//! match store.get_student(7).await {
//!     Ok(student) => println!("{}", student.name),
//!     Err(RecordError::NotFound { .. }) => println!("no such student"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

/// Result alias used by [`RecordStore`](super::store::RecordStore)
pub type StoreResult<T> = std::result::Result<T, RecordError>;

/// Field name → message mapping, in the order the checks ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping holding exactly one error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an error for a field; the first message for a field wins
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error
    pub fn into_result(self) -> StoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RecordError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors returned by record store operations and the REST adapter
#[derive(Debug, Error)]
pub enum RecordError {
    /// Some fields failed validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The addressed record does not exist
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// The username is already registered
    #[error("user '{username}' already exists")]
    Conflict { username: String },

    /// Credentials did not match, or the request carries no valid session/token
    #[error("{message}")]
    Unauthorized { message: String },

    /// Backend failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Error body returned by the REST layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: &'static str,
    /// Field map for validation errors, message string otherwise
    pub error: Value,
}

impl RecordError {
    pub fn student_not_found(id: i64) -> Self {
        RecordError::NotFound {
            entity: "Student",
            key: id.to_string(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        RecordError::Unauthorized {
            message: message.into(),
        }
    }

    /// A generic error for payloads that are not shaped like a record at all
    pub fn malformed(message: impl Into<String>) -> Self {
        RecordError::Validation(FieldErrors::single("request", message))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::Validation(_) => StatusCode::BAD_REQUEST,
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::Conflict { .. } => StatusCode::BAD_REQUEST,
            RecordError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RecordError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::Validation(_) => "VALIDATION_ERROR",
            RecordError::NotFound { .. } => "NOT_FOUND",
            RecordError::Conflict { .. } => "CONFLICT",
            RecordError::Unauthorized { .. } => "UNAUTHORIZED",
            RecordError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            RecordError::Validation(errors) => json!(errors),
            RecordError::NotFound { entity, .. } => json!(format!("{} not found", entity)),
            RecordError::Conflict { .. } => json!("User already exists"),
            RecordError::Unauthorized { message } => json!(message),
            // Backend details stay in the logs
            RecordError::Storage(_) => json!("Internal storage error"),
        };

        ErrorResponse {
            code: self.error_code(),
            error,
        }
    }
}

impl From<anyhow::Error> for RecordError {
    fn from(err: anyhow::Error) -> Self {
        RecordError::Storage(format!("{:#}", err))
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        if let RecordError::Storage(detail) = &self {
            tracing::error!(error = %detail, "storage backend failure");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
