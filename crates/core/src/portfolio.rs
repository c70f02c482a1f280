//! Portfolio field rules: lengths, categories, skill tags, share links.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a portfolio title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a portfolio description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

/// Maximum number of skill tags on one portfolio.
pub const MAX_SKILLS: usize = 50;

/// Maximum length of a single skill tag.
pub const MAX_SKILL_LENGTH: usize = 60;

/// Maximum length of a category value.
pub const MAX_CATEGORY_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_DEVELOPER: &str = "developer";
pub const CATEGORY_DESIGNER: &str = "designer";
pub const CATEGORY_WRITER: &str = "writer";
pub const CATEGORY_MARKETING: &str = "marketing";
pub const CATEGORY_BUSINESS: &str = "business";
pub const CATEGORY_OTHER: &str = "other";

/// Categories offered by the editor. Any other short text is still accepted.
pub const CONVENTIONAL_CATEGORIES: &[&str] = &[
    CATEGORY_DEVELOPER,
    CATEGORY_DESIGNER,
    CATEGORY_WRITER,
    CATEGORY_MARKETING,
    CATEGORY_BUSINESS,
    CATEGORY_OTHER,
];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a title: trimmed, non-empty, within the length limit.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional description. Blank collapses to `None`.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(Some(text.to_string()))
}

/// Validate an optional category. Stored lowercase; blank is `None`.
pub fn validate_category(category: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = category.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category exceeds maximum length of {MAX_CATEGORY_LENGTH} characters"
        )));
    }
    Ok(Some(text.to_lowercase()))
}

/// Normalize skill tags into a set.
///
/// Tags are trimmed, blanks dropped, and duplicates removed comparing
/// case-insensitively. The first spelling seen wins and order is kept.
pub fn normalize_skills(skills: &[String]) -> Result<Vec<String>, CoreError> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for raw in skills {
        let tag = raw.trim();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > MAX_SKILL_LENGTH {
            return Err(CoreError::Validation(format!(
                "Skill '{tag}' exceeds maximum length of {MAX_SKILL_LENGTH} characters"
            )));
        }
        if seen.insert(tag.to_lowercase()) {
            out.push(tag.to_string());
        }
    }
    if out.len() > MAX_SKILLS {
        return Err(CoreError::Validation(format!(
            "A portfolio can list at most {MAX_SKILLS} skills"
        )));
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

/// Message returned when a private portfolio is requested publicly.
pub const NOT_PUBLIC_MESSAGE: &str = "This portfolio is not publicly available";

/// Public link to a portfolio's view page.
pub fn share_url(public_base_url: &str, portfolio_id: DbId) -> String {
    format!(
        "{}/portfolio/view/{portfolio_id}",
        public_base_url.trim_end_matches('/')
    )
}

/// Gate for the public share path.
pub fn ensure_publicly_visible(is_public: bool) -> Result<(), CoreError> {
    if is_public {
        Ok(())
    } else {
        Err(CoreError::Forbidden(NOT_PUBLIC_MESSAGE.into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(validate_title("  My CV ").unwrap(), "My CV");
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_length_counts_characters() {
        let ok = "é".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&ok).is_ok());
        let long = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_matches!(validate_title(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_description_is_none() {
        assert_eq!(validate_description(Some("  ")).unwrap(), None);
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(validate_description(Some(" hi ")).unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn category_is_lowercased() {
        assert_eq!(validate_category(Some("Developer")).unwrap().as_deref(), Some("developer"));
        assert_eq!(validate_category(Some("")).unwrap(), None);
    }

    #[test]
    fn skills_are_deduplicated_case_insensitively() {
        let out = normalize_skills(&tags(&["Rust", " rust ", "", "Go", "RUST", "go "])).unwrap();
        assert_eq!(out, tags(&["Rust", "Go"]));
    }

    #[test]
    fn too_many_skills_rejected() {
        let many: Vec<String> = (0..=MAX_SKILLS).map(|i| format!("skill-{i}")).collect();
        assert_matches!(normalize_skills(&many), Err(CoreError::Validation(_)));
    }

    #[test]
    fn share_url_strips_trailing_slash() {
        assert_eq!(share_url("https://folio.dev/", 7), "https://folio.dev/portfolio/view/7");
        assert_eq!(share_url("https://folio.dev", 7), "https://folio.dev/portfolio/view/7");
    }

    #[test]
    fn private_portfolio_is_not_shareable() {
        assert!(ensure_publicly_visible(true).is_ok());
        assert_matches!(
            ensure_publicly_visible(false),
            Err(CoreError::Forbidden(msg)) if msg == NOT_PUBLIC_MESSAGE
        );
    }
}
