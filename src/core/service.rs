//! Service traits implemented by storage backends

use crate::core::record::{Credential, NewStudent, StudentPatch, StudentRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Storage for student records
///
/// Implementations must make `create` and `update` atomic: the id assignment
/// and the read-merge-write of a patch may not interleave with other writers.
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Persist a new record under the next id
    ///
    /// The next id is one more than the highest id ever assigned by this
    /// store, or 1 for an empty store. Ids of deleted records are not reused.
    async fn create(&self, student: NewStudent) -> Result<StudentRecord>;

    /// Get a record by id
    async fn get(&self, id: i64) -> Result<Option<StudentRecord>>;

    /// List all records in insertion (ascending id) order
    async fn list(&self) -> Result<Vec<StudentRecord>>;

    /// Merge a patch into an existing record
    ///
    /// Returns `Ok(None)` when no record has this id.
    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<StudentRecord>>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Storage for user credentials
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Whether a username is registered
    async fn contains(&self, username: &str) -> Result<bool>;

    /// Store a credential unless the username is taken
    ///
    /// Returns `false` (and stores nothing) when the username already exists.
    async fn insert(&self, credential: Credential) -> Result<bool>;

    /// Get the credential for a username
    async fn get(&self, username: &str) -> Result<Option<Credential>>;
}
