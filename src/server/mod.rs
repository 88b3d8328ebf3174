//! Server module: REST handlers, routing and the `ServerBuilder`
//!
//! The builder wires a [`RecordStore`](crate::core::store::RecordStore) and
//! an [`AuthProvider`](crate::core::auth::AuthProvider) into:
//! - CRUD routes under `/students` behind the auth guard
//! - Public `/register`, `/login`, `/logout` and `/health` routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
