//! Student and credential value records
//!
//! Records are plain values. Incoming payloads are checked by the validator
//! first and only then converted into a [`NewStudent`] or [`StudentPatch`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical field names of a student record
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const EMAIL: &str = "email";
    pub const CLASS: &str = "class";
    pub const LOCATION: &str = "location";
    pub const SEMESTER: &str = "semester";
    pub const BRANCH: &str = "branch";
    pub const PHONE_NUMBER: &str = "phone_number";
}

/// Alternative payload keys accepted for a canonical field
pub fn aliases(field: &str) -> &'static [&'static str] {
    match field {
        fields::CLASS => &["subject"],
        fields::LOCATION => &["address"],
        _ => &[],
    }
}

/// Look up a field in a payload by its canonical name or any alias
pub fn lookup<'a>(payload: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    payload
        .get(field)
        .or_else(|| aliases(field).iter().find_map(|alias| payload.get(*alias)))
}

/// A stored student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: String,
    #[serde(rename = "class", alias = "subject")]
    pub course: String,
    #[serde(alias = "address")]
    pub location: String,
    pub semester: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl StudentRecord {
    /// Merge the supplied fields of a patch into this record
    ///
    /// The id is never touched.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(course) = &patch.course {
            self.course = course.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(semester) = patch.semester {
            self.semester = semester;
        }
        if let Some(branch) = &patch.branch {
            self.branch = Some(branch.clone());
        }
        if let Some(phone_number) = &patch.phone_number {
            self.phone_number = Some(phone_number.clone());
        }
    }
}

/// A student record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub email: String,
    #[serde(rename = "class")]
    pub course: String,
    pub location: String,
    pub semester: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl NewStudent {
    pub fn with_id(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            course: self.course,
            location: self.location,
            semester: self.semester,
            branch: self.branch,
            phone_number: self.phone_number,
        }
    }
}

/// The subset of student fields supplied by an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub location: Option<String>,
    pub semester: Option<i64>,
    pub branch: Option<String>,
    pub phone_number: Option<String>,
}

impl StudentPatch {
    /// Extract the known fields from an already validated payload
    ///
    /// Unknown keys (including `id`) are ignored.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let text = |field| lookup(payload, field).and_then(Value::as_str).map(str::to_string);
        let int = |field| lookup(payload, field).and_then(Value::as_i64);

        Self {
            name: text(fields::NAME),
            age: int(fields::AGE),
            email: text(fields::EMAIL),
            course: text(fields::CLASS),
            location: text(fields::LOCATION),
            semester: int(fields::SEMESTER),
            branch: text(fields::BRANCH),
            phone_number: lookup(payload, fields::PHONE_NUMBER).and_then(phone_digits),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Turn a complete patch into a new record
    ///
    /// Returns `None` when a mandatory field is missing.
    pub fn into_new(self) -> Option<NewStudent> {
        Some(NewStudent {
            name: self.name?,
            age: self.age?,
            email: self.email?,
            course: self.course?,
            location: self.location?,
            semester: self.semester?,
            branch: self.branch,
            phone_number: self.phone_number,
        })
    }
}

/// Phone numbers arrive either as a digit string or as a bare integer
pub(crate) fn phone_digits(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

/// A registered username and its password
///
/// Passwords are kept exactly as supplied.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
