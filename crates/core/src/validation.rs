//! Input validators for reference entities and activity logs.
//!
//! Handlers call these before touching the database so that bad input is
//! reported as `400 VALIDATION_ERROR` instead of a constraint failure.

use crate::error::CoreError;

/// Maximum length of any reference-entity name (students, locations, ...).
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum length of an external survey response id.
pub const MAX_RESPONSE_ID_LENGTH: usize = 64;

/// Validate a reference-entity name and return it trimmed.
pub fn validate_name(field: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Logged minutes can be zero but never negative.
pub fn validate_minutes_spent(minutes: i32) -> Result<(), CoreError> {
    if minutes < 0 {
        return Err(CoreError::Validation(format!(
            "minutes_spent must be non-negative, got {minutes}"
        )));
    }
    Ok(())
}

/// Unit requirements, when present, can be zero but never negative.
pub fn validate_required_minutes(required: Option<i32>) -> Result<(), CoreError> {
    match required {
        Some(minutes) if minutes < 0 => Err(CoreError::Validation(format!(
            "required_minutes must be non-negative, got {minutes}"
        ))),
        _ => Ok(()),
    }
}

/// Student numbers are positive integers.
pub fn validate_student_number(number: Option<i64>) -> Result<(), CoreError> {
    match number {
        Some(n) if n <= 0 => Err(CoreError::Validation(format!(
            "student_number must be positive, got {n}"
        ))),
        _ => Ok(()),
    }
}

/// Validate an external response id, if present.
pub fn validate_response_id(response_id: Option<&str>) -> Result<(), CoreError> {
    match response_id {
        Some(id) if id.is_empty() => Err(CoreError::Validation(
            "response_id must not be empty".to_string(),
        )),
        Some(id) if id.len() > MAX_RESPONSE_ID_LENGTH => Err(CoreError::Validation(format!(
            "response_id exceeds maximum length of {MAX_RESPONSE_ID_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}
