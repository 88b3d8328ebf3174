//! Integration test infrastructure for storage backends.
//!
//! Builds the real application router around a `RecordStore` so backends are
//! exercised through full HTTP round-trips.
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router)
//!         ├─ POST   /students       → create_student
//!         ├─ GET    /students       → list_students
//!         ├─ GET    /students/{id}  → get_student
//!         ├─ PUT    /students/{id}  → update_student
//!         ├─ DELETE /students/{id}  → delete_student
//!         ├─ POST   /register, /login, /logout
//!         └─ GET    /health
//! ```

#[macro_use]
pub mod rest_tests;

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use student_records::core::auth::{AuthProvider, NoAuthProvider};
use student_records::core::store::RecordStore;
use student_records::server::ServerBuilder;

/// Router with every route public
pub fn build_test_router(store: RecordStore) -> Router {
    build_test_router_with_auth(store, Arc::new(NoAuthProvider))
}

pub fn build_test_router_with_auth(store: RecordStore, auth: Arc<dyn AuthProvider>) -> Router {
    ServerBuilder::new()
        .with_store(store)
        .with_auth(auth)
        .build()
        .expect("router should build")
}

pub fn test_server(router: Router) -> TestServer {
    TestServer::try_new(router).expect("test server should start")
}
