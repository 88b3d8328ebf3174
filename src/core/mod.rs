//! Core module containing the record model, validation and the record store

pub mod auth;
pub mod error;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, LoginGrant, NoAuthProvider};
pub use error::{FieldErrors, RecordError, StoreResult};
pub use record::{Credential, NewStudent, StudentPatch, StudentRecord};
pub use service::{CredentialService, StudentService};
pub use store::RecordStore;
pub use validation::{PasswordPolicy, ValidationProfile};
