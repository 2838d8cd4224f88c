//! Field validators for incoming entity payloads.

use crate::error::CoreError;

/// Minimum length for passwords of newly created or updated users.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Require a non-blank string field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Require a strictly positive integer field.
pub fn require_positive(field: &str, value: i32) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

/// Loose `local@domain.tld` shape check. Deliverability is not our concern.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid email address: {email}"));
    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.')
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
