//! Support ticket statuses and message rules.
//!
//! A ticket starts `open`, moves to `in_progress` once an admin takes it,
//! and ends `closed`. Closed tickets are never reopened; a user who writes
//! again gets a fresh ticket.

use crate::error::CoreError;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_CLOSED: &str = "closed";

pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_CLOSED];

/// Statuses in which a ticket still accepts messages.
pub const ACTIVE_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS];

/// Maximum length of a support message in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

pub fn is_active(status: &str) -> bool {
    ACTIVE_STATUSES.contains(&status)
}

/// Return the statuses reachable from `from_status`.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_OPEN => &[STATUS_IN_PROGRESS, STATUS_CLOSED],
        STATUS_IN_PROGRESS => &[STATUS_CLOSED],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move ticket from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

/// Validate an optional status filter.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a message body: trimmed, non-empty, within the length limit.
pub fn validate_message(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Message cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
