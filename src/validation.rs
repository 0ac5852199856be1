use serde::Serialize;
use validator::ValidateEmail;

use crate::models::UserPayload;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Violation {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Payload accepted by the validator, with the name trimmed
#[derive(Debug, Clone)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
}

/// Check a candidate payload against the user field rules.
///
/// All violations are collected so the caller can fix every field in one
/// round trip. Field order is stable: name first, then email.
pub fn validate_user_payload(payload: &UserPayload) -> Result<ValidUser, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        violations.push(Violation::new("name", "Name is required"));
    }

    let email = payload.email.as_deref().unwrap_or_default();
    if email.is_empty() {
        violations.push(Violation::new("email", "Email is required"));
    } else if !email.validate_email() {
        violations.push(Violation::new("email", "Email must be a valid email address"));
    }

    if violations.is_empty() {
        Ok(ValidUser {
            name: name.to_string(),
            email: email.to_string(),
        })
    } else {
        Err(violations)
    }
}
