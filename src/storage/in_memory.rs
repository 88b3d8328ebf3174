//! In-memory implementations of the storage services
//!
//! Useful for tests, development and the single-process deployment. State is
//! kept behind an `RwLock` so every operation is atomic.

use crate::core::record::{Credential, NewStudent, StudentPatch, StudentRecord};
use crate::core::service::{CredentialService, StudentService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct StudentTable {
    rows: BTreeMap<i64, StudentRecord>,
    /// Highest id ever handed out, so deleted ids stay retired
    last_id: i64,
}

/// In-memory student service
#[derive(Clone, Default)]
pub struct InMemoryStudentService {
    table: Arc<RwLock<StudentTable>>,
}

impl InMemoryStudentService {
    /// Create a new empty in-memory student service
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentService for InMemoryStudentService {
    async fn create(&self, student: NewStudent) -> Result<StudentRecord> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let max_existing = table.rows.keys().next_back().copied().unwrap_or(0);
        let id = table.last_id.max(max_existing) + 1;
        table.last_id = id;

        let record = student.with_id(id);
        table.rows.insert(id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<StudentRecord>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<StudentRecord>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<StudentRecord>> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.get_mut(&id).map(|record| {
            record.apply(&patch);
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.remove(&id).is_some())
    }
}

/// In-memory credential service
#[derive(Clone, Default)]
pub struct InMemoryCredentialService {
    users: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialService {
    /// Create a new empty in-memory credential service
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialService for InMemoryCredentialService {
    async fn contains(&self, username: &str) -> Result<bool> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.contains_key(username))
    }

    async fn insert(&self, credential: Credential) -> Result<bool> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if users.contains_key(&credential.username) {
            return Ok(false);
        }
        users.insert(credential.username.clone(), credential);

        Ok(true)
    }

    async fn get(&self, username: &str) -> Result<Option<Credential>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(username).cloned())
    }
}
