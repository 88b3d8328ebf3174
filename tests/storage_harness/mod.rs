//! Shared test harness for storage backend testing
//!
//! Provides payload and record builders plus the contract test macros every
//! backend must pass.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod student_service_tests;

#[macro_use]
pub mod credential_service_tests;

#[macro_use]
pub mod integration;

use serde_json::{Value, json};
use student_records::core::record::NewStudent;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A valid `NewStudent` under every profile
pub fn new_student(name: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        age: 24,
        email: format!("{}@gmail.com", name.to_lowercase().replace(' ', ".")),
        course: "web-backend-engineering".to_string(),
        location: "fullerton".to_string(),
        semester: 6,
        branch: Some("computer science".to_string()),
        phone_number: Some("5551234567".to_string()),
    }
}

/// The canonical create payload
pub fn sanjay_payload() -> Value {
    json!({
        "name": "Sanjay",
        "age": 24,
        "email": "sanjay@gmail.com",
        "class": "web-backend-engineering",
        "location": "fullerton",
        "semester": 6
    })
}

pub fn kalea_payload() -> Value {
    json!({
        "name": "Kalea",
        "age": 22,
        "email": "kalea@gmail.com",
        "class": "Math",
        "location": "Riverside",
        "semester": 5
    })
}
