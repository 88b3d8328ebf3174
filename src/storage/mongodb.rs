//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStudentService` and `MongoCredentialService` backed by a
//! MongoDB database via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! student-records = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! - `students`: one document per record, the integer id stored as `_id`.
//! - `counters`: a `{ _id: "students", seq }` document bumped atomically with
//!   `findOneAndUpdate` to hand out ids. The sequence only grows, so ids of
//!   deleted records are never reused.
//! - `users`: one document per credential with the username as `_id`.

use crate::core::record::{Credential, NewStudent, StudentPatch, StudentRecord, fields};
use crate::core::service::{CredentialService, StudentService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;

const STUDENTS: &str = "students";
const COUNTERS: &str = "counters";
const USERS: &str = "users";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Serialize a record into a BSON document, renaming `id` → `_id`.
fn student_to_document(record: &StudentRecord) -> Result<Document> {
    let mut doc = mongodb::bson::to_document(record)
        .map_err(|e| anyhow!("Failed to convert student to BSON: {}", e))?;

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Deserialize a BSON document back into a record, renaming `_id` → `id`.
fn document_to_student(mut doc: Document) -> Result<StudentRecord> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    mongodb::bson::from_document(doc)
        .map_err(|e| anyhow!("Failed to deserialize student from document: {}", e))
}

/// Build the `$set` document for the supplied fields of a patch.
fn patch_to_set(patch: &StudentPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert(fields::NAME, name.as_str());
    }
    if let Some(age) = patch.age {
        set.insert(fields::AGE, age);
    }
    if let Some(email) = &patch.email {
        set.insert(fields::EMAIL, email.as_str());
    }
    if let Some(course) = &patch.course {
        set.insert(fields::CLASS, course.as_str());
    }
    if let Some(location) = &patch.location {
        set.insert(fields::LOCATION, location.as_str());
    }
    if let Some(semester) = patch.semester {
        set.insert(fields::SEMESTER, semester);
    }
    if let Some(branch) = &patch.branch {
        set.insert(fields::BRANCH, branch.as_str());
    }
    if let Some(phone_number) = &patch.phone_number {
        set.insert(fields::PHONE_NUMBER, phone_number.as_str());
    }
    set
}

// ---------------------------------------------------------------------------
// MongoStudentService
// ---------------------------------------------------------------------------

/// Student storage backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use student_records::storage::mongodb::MongoStudentService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let service = MongoStudentService::new(client.database("student_management"));
/// ```
#[derive(Clone, Debug)]
pub struct MongoStudentService {
    database: Database,
}

impl MongoStudentService {
    /// Create a new `MongoStudentService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(STUDENTS)
    }

    /// Bump and return the student id sequence.
    async fn next_id(&self) -> Result<i64> {
        let counter = self
            .database
            .collection::<Document>(COUNTERS)
            .find_one_and_update(doc! { "_id": STUDENTS }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to advance student id sequence: {}", e))?
            .ok_or_else(|| anyhow!("Student id sequence missing after upsert"))?;

        match counter.get("seq") {
            Some(Bson::Int64(seq)) => Ok(*seq),
            Some(Bson::Int32(seq)) => Ok(i64::from(*seq)),
            other => Err(anyhow!("Unexpected student id sequence value: {:?}", other)),
        }
    }
}

#[async_trait]
impl StudentService for MongoStudentService {
    async fn create(&self, student: NewStudent) -> Result<StudentRecord> {
        let record = student.with_id(self.next_id().await?);

        self.collection()
            .insert_one(student_to_document(&record)?)
            .await
            .map_err(|e| anyhow!("Failed to create student: {}", e))?;

        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<StudentRecord>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to get student: {}", e))?;

        doc.map(document_to_student).transpose()
    }

    async fn list(&self) -> Result<Vec<StudentRecord>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| anyhow!("Failed to list students: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect students: {}", e))?;

        docs.into_iter().map(document_to_student).collect()
    }

    /// Applies the patch with a single `findOneAndUpdate`.
    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<StudentRecord>> {
        let set = patch_to_set(&patch);
        if set.is_empty() {
            return self.get(id).await;
        }

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update student: {}", e))?;

        updated.map(document_to_student).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to delete student: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

// ---------------------------------------------------------------------------
// MongoCredentialService
// ---------------------------------------------------------------------------

/// Credential storage backed by MongoDB.
#[derive(Clone, Debug)]
pub struct MongoCredentialService {
    database: Database,
}

impl MongoCredentialService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(USERS)
    }
}

#[async_trait]
impl CredentialService for MongoCredentialService {
    async fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.get(username).await?.is_some())
    }

    /// Upsert with `$setOnInsert`, so an existing user is left untouched.
    async fn insert(&self, credential: Credential) -> Result<bool> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": credential.username.as_str() },
                doc! { "$setOnInsert": { "password": credential.password.as_str() } },
            )
            .upsert(true)
            .await
            .map_err(|e| anyhow!("Failed to insert user: {}", e))?;

        Ok(result.upserted_id.is_some())
    }

    async fn get(&self, username: &str) -> Result<Option<Credential>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": username })
            .await
            .map_err(|e| anyhow!("Failed to get user: {}", e))?;

        doc.map(|doc| -> Result<Credential> {
            let password = doc
                .get_str("password")
                .map_err(|e| anyhow!("Malformed user document: {}", e))?;
            Ok(Credential::new(username, password))
        })
        .transpose()
    }
}
