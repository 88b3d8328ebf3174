//! Route table and the auth guard for student routes

use super::handlers::{
    AppState, create_student, delete_student, get_student, health, list_students, login, logout,
    register, update_student,
};
use crate::core::error::RecordError;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Resolve the caller and enforce the provider's policy
///
/// The resulting [`AuthContext`](crate::core::auth::AuthContext) is stored in
/// the request extensions for the handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, RecordError> {
    let context = state.auth.authorize(req.headers()).await?;

    if !state.auth.student_policy().check(&context) {
        tracing::debug!(provider = state.auth.name(), "rejected unauthenticated request");
        return Err(state.auth.rejection());
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Build student routes (guarded by [`require_auth`])
///
/// - GET    /students       - List students
/// - POST   /students       - Create a student
/// - GET    /students/{id}  - Get a student
/// - PUT    /students/{id}  - Update supplied fields
/// - DELETE /students/{id}  - Delete a student
pub fn build_student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

/// Build the public routes: /register, /login, /logout and /health
pub fn build_public_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/health", get(health))
        .with_state(state)
}

/// Assemble the full application router
pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
    let mut app = build_public_routes(state.clone()).merge(build_student_routes(state));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(TraceLayer::new_for_http())
}
