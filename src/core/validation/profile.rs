//! Per-deployment validation profile
//!
//! A profile enumerates which student fields are required, the accepted age
//! range, how strict the name rule is and which password policy applies. The
//! same profile drives both the create path (full validation) and the update
//! path (only supplied fields).

use super::validators;
use crate::core::error::FieldErrors;
use crate::core::record::{fields, lookup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semester range shared by every profile
pub const SEMESTER_RANGE: IntRange = IntRange { min: 1, max: 8 };

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Password rule applied on register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordPolicy {
    /// At least 8 characters and one character from a fixed special set
    #[default]
    Special,
    /// At least 8 characters with a digit, an uppercase, a lowercase and a non-alphanumeric character
    Strict,
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), String> {
        match self {
            PasswordPolicy::Special => validators::special_password(password),
            PasswordPolicy::Strict => validators::strict_password(password),
        }
    }
}

type Check = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Validation rules for one canonical field
struct FieldRule {
    field: &'static str,
    required: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    fn new(field: &'static str, required: bool) -> Self {
        Self {
            field,
            required,
            checks: Vec::new(),
        }
    }

    fn check(
        mut self,
        validator: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Box::new(validator));
        self
    }

    /// First failing check's message, if any
    fn run(&self, value: &Value) -> Option<String> {
        self.checks
            .iter()
            .find_map(|check| check(self.field, value).err())
    }
}

/// Validation settings for a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationProfile {
    /// Accepted age range (inclusive)
    pub age: IntRange,
    /// Names must be letters and spaces only, at least 2 long
    pub strict_name: bool,
    /// `branch` must be present on create
    pub require_branch: bool,
    /// `phone_number` must be present on create
    pub require_phone_number: bool,
    pub password_policy: PasswordPolicy,
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self::classic()
    }
}

impl ValidationProfile {
    /// Ages 16 to 99, special-character passwords, no optional fields required
    pub fn classic() -> Self {
        Self {
            age: IntRange::new(16, 99),
            strict_name: false,
            require_branch: false,
            require_phone_number: false,
            password_policy: PasswordPolicy::Special,
        }
    }

    /// Same as [`classic`](Self::classic) but with ages 1 to 100
    pub fn orm() -> Self {
        Self {
            age: IntRange::new(1, 100),
            ..Self::classic()
        }
    }

    /// Ages 18 to 100, letters-only names, branch and phone required, strict passwords
    pub fn strict() -> Self {
        Self {
            age: IntRange::new(18, 100),
            strict_name: true,
            require_branch: true,
            require_phone_number: true,
            password_policy: PasswordPolicy::Strict,
        }
    }

    /// Look up a named profile (`classic`, `orm`, `strict`)
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "orm" => Some(Self::orm()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }

    fn rules(&self) -> Vec<FieldRule> {
        let mut name = FieldRule::new(fields::NAME, true)
            .check(validators::string())
            .check(validators::non_blank());
        if self.strict_name {
            name = name.check(validators::letters_and_spaces(2));
        }

        vec![
            name,
            FieldRule::new(fields::AGE, true)
                .check(validators::integer_between(self.age.min, self.age.max)),
            FieldRule::new(fields::EMAIL, true).check(validators::email()),
            FieldRule::new(fields::CLASS, true)
                .check(validators::string())
                .check(validators::non_blank()),
            FieldRule::new(fields::LOCATION, true)
                .check(validators::string())
                .check(validators::non_blank()),
            FieldRule::new(fields::SEMESTER, true).check(validators::integer_between(
                SEMESTER_RANGE.min,
                SEMESTER_RANGE.max,
            )),
            FieldRule::new(fields::BRANCH, self.require_branch)
                .check(validators::string())
                .check(validators::non_blank()),
            FieldRule::new(fields::PHONE_NUMBER, self.require_phone_number)
                .check(validators::digits(10)),
        ]
    }

    /// Validate a candidate student payload
    ///
    /// With `partial == false` every required field must be present and valid.
    /// With `partial == true` only the supplied fields are checked. All rules
    /// run and every failing field is reported; an empty result means valid.
    pub fn validate_student(&self, candidate: &Value, partial: bool) -> FieldErrors {
        let Some(payload) = candidate.as_object() else {
            return FieldErrors::single("request", "Request body must be a JSON object");
        };

        let mut errors = FieldErrors::new();
        for rule in self.rules() {
            match lookup(payload, rule.field) {
                Some(value) => {
                    if let Some(message) = rule.run(value) {
                        errors.insert(rule.field, message);
                    }
                }
                None if rule.required && !partial => {
                    errors.insert(rule.field, format!("'{}' is required", rule.field));
                }
                None => {}
            }
        }
        errors
    }

    /// Validate a username/password pair for registration
    ///
    /// Uniqueness is not checked here.
    pub fn validate_credentials(&self, username: &str, password: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if username.trim().is_empty() {
            errors.insert("username", "Username is required");
        }
        if password.is_empty() {
            errors.insert("password", "Password is required");
        } else if let Err(message) = self.password_policy.check(password) {
            errors.insert("password", message);
        }
        errors
    }
}
