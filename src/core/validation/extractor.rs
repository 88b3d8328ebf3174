//! Axum extractor for JSON request bodies
//!
//! `JsonPayload` accepts any syntactically valid JSON document and leaves
//! field-level validation to the record store. Bodies that are not JSON at
//! all are rejected with a generic validation error instead of axum's plain
//! text rejection.

use crate::core::error::RecordError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Raw JSON body of a request
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_student(
///     State(state): State<AppState>,
///     JsonPayload(payload): JsonPayload,
/// ) -> Result<Json<StudentRecord>, RecordError> {
///     Ok(Json(state.store.create_student(&payload).await?))
/// }
/// ```
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = RecordError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(JsonPayload(payload)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(RecordError::malformed("Request body must be JSON"))
            }
        }
    }
}
