//! Reusable field validators
//!
//! Each validator receives the field name and its raw JSON value, and returns
//! the message to report for that field when the value is rejected. Type
//! checks are strict: a float never passes as an integer and a numeric string
//! never passes as a number.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Special characters accepted by [`PasswordPolicy::Special`](super::PasswordPolicy::Special)
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validator: value must be a JSON string
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(format!("'{}' must be a string", field))
        }
    }
}

/// Validator: string must contain something besides whitespace
pub fn non_blank() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if s.trim().is_empty() => Err(format!("'{}' must not be empty", field)),
        _ => Ok(()),
    }
}

/// Validator: string made of ASCII letters and spaces, at least `min` long
pub fn letters_and_spaces(
    min: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let letters_only = s.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
        if letters_only && s.chars().count() >= min {
            Ok(())
        } else {
            Err(format!(
                "'{}' must be at least {} characters long and contain only alphabets",
                field, min
            ))
        }
    }
}

/// Validator: value must be an integer (not a float, not a string) in `[min, max]`
pub fn integer_between(
    min: i64,
    max: i64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_i64() {
        Some(n) if (min..=max).contains(&n) => Ok(()),
        _ => Err(format!(
            "'{}' must be an integer between {} and {}",
            field, min, max
        )),
    }
}

/// Validator: string must look like an email address
///
/// Purely syntactic: `local@label.tld` with a permissive character set.
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_str() {
        Some(s) if is_valid_email(s) => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validator: exactly `len` decimal digits, given as a string or a bare integer
pub fn digits(len: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let rendered = match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_u64() => Some(n.to_string()),
            _ => None,
        };
        match rendered {
            Some(s) if s.len() == len && s.chars().all(|c| c.is_ascii_digit()) => Ok(()),
            _ => Err(format!("'{}' must be exactly {} digits", field, len)),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").unwrap());
    regex.is_match(email)
}

/// Password check: at least 8 characters and one of [`PASSWORD_SPECIALS`]
pub fn special_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 || !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(
            "Password must be at least 8 characters long and contain at least one special character"
                .to_string(),
        );
    }
    Ok(())
}

/// Password check: length, digit, upper, lower and non-alphanumeric, reported one at a time
pub fn strict_password(password: &str) -> Result<(), String> {
    let checks: [(fn(&str) -> bool, &str); 5] = [
        (
            |p: &str| p.chars().count() >= 8,
            "Password must be at least 8 characters long.",
        ),
        (
            |p: &str| p.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit.",
        ),
        (
            |p: &str| p.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter.",
        ),
        (
            |p: &str| p.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter.",
        ),
        (
            |p: &str| p.chars().any(|c| !c.is_alphanumeric()),
            "Password must contain at least one special character.",
        ),
    ];

    match checks.iter().find(|(passes, _)| !passes(password)) {
        Some((_, message)) => Err(message.to_string()),
        None => Ok(()),
    }
}
