//! Validation system
//!
//! Field validators, the per-deployment [`ValidationProfile`] that combines
//! them into student and credential rules, and the request body extractor.

pub mod extractor;
pub mod profile;
pub mod validators;

pub use extractor::JsonPayload;
pub use profile::{IntRange, PasswordPolicy, SEMESTER_RANGE, ValidationProfile};
