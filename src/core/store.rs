//! The record store: validation plus CRUD over injected backends
//!
//! `RecordStore` is the single owner of mutation semantics. Handlers hold a
//! clone (all state is behind `Arc`) and never talk to a backend directly.

use crate::core::error::{RecordError, StoreResult};
use crate::core::record::{Credential, StudentPatch, StudentRecord};
use crate::core::service::{CredentialService, StudentService};
use crate::core::validation::ValidationProfile;
use crate::storage::{InMemoryCredentialService, InMemoryStudentService};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// CRUD surface over student records and credentials
///
/// Mutating operations (`create`, `update`, `delete`, `register`) run one at
/// a time per store, so read-then-write sequences such as the duplicate
/// username check cannot interleave.
#[derive(Clone)]
pub struct RecordStore {
    profile: Arc<ValidationProfile>,
    students: Arc<dyn StudentService>,
    credentials: Arc<dyn CredentialService>,
    write_gate: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(
        profile: ValidationProfile,
        students: Arc<dyn StudentService>,
        credentials: Arc<dyn CredentialService>,
    ) -> Self {
        Self {
            profile: Arc::new(profile),
            students,
            credentials,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// A store backed by the in-memory services
    pub fn in_memory(profile: ValidationProfile) -> Self {
        Self::new(
            profile,
            Arc::new(InMemoryStudentService::new()),
            Arc::new(InMemoryCredentialService::new()),
        )
    }

    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    /// Validate a full payload and persist it under a fresh id
    pub async fn create_student(&self, candidate: &Value) -> StoreResult<StudentRecord> {
        self.profile
            .validate_student(candidate, false)
            .into_result()?;

        let student = candidate
            .as_object()
            .map(StudentPatch::from_payload)
            .and_then(StudentPatch::into_new)
            .ok_or_else(|| RecordError::malformed("Request body must be a JSON object"))?;

        let _guard = self.write_gate.lock().await;
        let record = self.students.create(student).await?;
        tracing::debug!(student_id = record.id, "student created");
        Ok(record)
    }

    pub async fn get_student(&self, id: i64) -> StoreResult<StudentRecord> {
        self.students
            .get(id)
            .await?
            .ok_or_else(|| RecordError::student_not_found(id))
    }

    /// All students in insertion order
    pub async fn list_students(&self) -> StoreResult<Vec<StudentRecord>> {
        Ok(self.students.list().await?)
    }

    /// Validate the supplied fields and merge them into the stored record
    ///
    /// An unknown id is reported before any validation happens. Fields absent
    /// from `candidate` keep their stored value; the id never changes.
    pub async fn update_student(&self, id: i64, candidate: &Value) -> StoreResult<StudentRecord> {
        let _guard = self.write_gate.lock().await;

        let existing = self
            .students
            .get(id)
            .await?
            .ok_or_else(|| RecordError::student_not_found(id))?;

        self.profile.validate_student(candidate, true).into_result()?;

        let patch = candidate
            .as_object()
            .map(StudentPatch::from_payload)
            .unwrap_or_default();
        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .students
            .update(id, patch)
            .await?
            .ok_or_else(|| RecordError::student_not_found(id))?;
        tracing::debug!(student_id = id, "student updated");
        Ok(updated)
    }

    pub async fn delete_student(&self, id: i64) -> StoreResult<()> {
        let _guard = self.write_gate.lock().await;

        if !self.students.delete(id).await? {
            return Err(RecordError::student_not_found(id));
        }
        tracing::debug!(student_id = id, "student deleted");
        Ok(())
    }

    /// Register a new username
    ///
    /// A taken username is a conflict regardless of the password supplied.
    pub async fn register(&self, username: &str, password: &str) -> StoreResult<()> {
        let _guard = self.write_gate.lock().await;

        if self.credentials.contains(username).await? {
            return Err(RecordError::Conflict {
                username: username.to_string(),
            });
        }

        self.profile
            .validate_credentials(username, password)
            .into_result()?;

        if !self
            .credentials
            .insert(Credential::new(username, password))
            .await?
        {
            return Err(RecordError::Conflict {
                username: username.to_string(),
            });
        }

        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Create every payload in order, stopping at the first invalid one
    ///
    /// Does nothing when the store already holds students, so a persistent
    /// backend is only seeded once.
    pub async fn seed(&self, payloads: &[Value]) -> StoreResult<usize> {
        if payloads.is_empty() || !self.students.list().await?.is_empty() {
            return Ok(0);
        }
        for payload in payloads {
            self.create_student(payload).await?;
        }
        tracing::info!(count = payloads.len(), "seeded students");
        Ok(payloads.len())
    }

    /// Check a username/password pair
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<()> {
        match self.credentials.get(username).await? {
            Some(stored) if stored.password == password => Ok(()),
            _ => {
                tracing::warn!(username, "rejected login");
                Err(RecordError::invalid_credentials())
            }
        }
    }
}
