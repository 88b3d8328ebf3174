//! # Student Records
//!
//! A small CRUD service for student records and user credentials, built so the
//! persistence backend and the authentication mechanism can be swapped without
//! touching validation or mutation semantics.
//!
//! ## Features
//!
//! - **Single Validator**: one rule set, driven by a [`ValidationProfile`](core::validation::ValidationProfile)
//! - **Aggregated Errors**: every invalid field is reported at once
//! - **Pluggable Storage**: in-memory, MySQL (`mysql` feature) or MongoDB (`mongodb_backend` feature)
//! - **Pluggable Auth**: none, cookie sessions or bearer-style JWT tokens
//! - **Monotonic Ids**: student ids are never reused, even after deletes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use student_records::prelude::*;
//!
//! let store = RecordStore::in_memory(ValidationProfile::classic());
//!
//! let created = store
//!     .create_student(&json!({
//!         "name": "Sanjay",
//!         "age": 24,
//!         "email": "sanjay@gmail.com",
//!         "class": "web-backend-engineering",
//!         "location": "fullerton",
//!         "semester": 6
//!     }))
//!     .await?;
//! assert_eq!(created.id, 1);
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_auth_provider(SessionAuthProvider::default())
//!     .serve("127.0.0.1:5000")
//!     .await?;
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, LoginGrant, NoAuthProvider},
        error::{FieldErrors, RecordError, StoreResult},
        record::{Credential, NewStudent, StudentPatch, StudentRecord},
        service::{CredentialService, StudentService},
        store::RecordStore,
        validation::{PasswordPolicy, ValidationProfile},
    };

    // === Auth providers ===
    pub use crate::auth::{SessionAuthProvider, TokenAuthProvider};

    // === Storage ===
    pub use crate::storage::{InMemoryCredentialService, InMemoryStudentService};

    // === Config ===
    pub use crate::config::{AppConfig, AuthConfig, AuthMode, BackendConfig, BackendKind};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
