//! Content reports and the admin actions that settle them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_IGNORED: &str = "ignored";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_RESOLVED, STATUS_IGNORED];

pub const TARGET_PORTFOLIO: &str = "portfolio";
pub const TARGET_COMMENT: &str = "comment";

pub const VALID_TARGET_TYPES: &[&str] = &[TARGET_PORTFOLIO, TARGET_COMMENT];

/// Maximum length of a report reason in characters.
pub const MAX_REASON_LENGTH: usize = 1_000;

/// Admin decision on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Resolve,
    Ignore,
    /// Delete the reported content and mark the report resolved.
    Delete,
}

impl ReportAction {
    /// Status the report ends in after this action.
    pub fn resulting_status(self) -> &'static str {
        match self {
            ReportAction::Resolve | ReportAction::Delete => STATUS_RESOLVED,
            ReportAction::Ignore => STATUS_IGNORED,
        }
    }

    pub fn removes_target(self) -> bool {
        matches!(self, ReportAction::Delete)
    }
}

/// Only pending reports accept an action.
pub fn ensure_actionable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_PENDING {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Report has already been {status}"
        )))
    }
}

pub fn validate_target_type(target_type: &str) -> Result<(), CoreError> {
    if VALID_TARGET_TYPES.contains(&target_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report target '{target_type}'. Must be one of: {}",
            VALID_TARGET_TYPES.join(", ")
        )))
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

pub fn validate_reason(reason: &str) -> Result<String, CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("A reason is required".into()));
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reason exceeds maximum length of {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn actions_map_to_statuses() {
        assert_eq!(ReportAction::Resolve.resulting_status(), STATUS_RESOLVED);
        assert_eq!(ReportAction::Ignore.resulting_status(), STATUS_IGNORED);
        assert_eq!(ReportAction::Delete.resulting_status(), STATUS_RESOLVED);
        assert!(ReportAction::Delete.removes_target());
        assert!(!ReportAction::Resolve.removes_target());
    }

    #[test]
    fn only_pending_is_actionable() {
        assert!(ensure_actionable(STATUS_PENDING).is_ok());
        assert_matches!(ensure_actionable(STATUS_RESOLVED), Err(CoreError::Conflict(_)));
        assert_matches!(ensure_actionable(STATUS_IGNORED), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn target_types() {
        assert!(validate_target_type("comment").is_ok());
        assert_matches!(validate_target_type("user"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn action_deserializes_lowercase() {
        let action: ReportAction = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(action, ReportAction::Delete);
    }

    #[test]
    fn reason_required() {
        assert_matches!(validate_reason("  "), Err(CoreError::Validation(_)));
        assert_eq!(validate_reason(" spam ").unwrap(), "spam");
    }
}
