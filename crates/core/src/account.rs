//! Account field validation.

use validator::ValidateEmail;

use crate::error::CoreError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate and normalize an email address (trimmed, lowercased).
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    if !normalized.validate_email() {
        return Err(CoreError::Validation("Invalid email address".into()));
    }
    Ok(normalized)
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional display name. Blank collapses to `None`.
pub fn validate_display_name(name: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Display name exceeds maximum length of {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
