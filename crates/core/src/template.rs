//! Template catalog and the tier gate for template selection.
//!
//! Templates are a fixed set baked into the client renderer; the server only
//! needs their ids and tier so it can refuse premium templates to accounts
//! that are not on the premium plan.

use serde::Serialize;

use crate::error::CoreError;
use crate::tier::UserTier;

/// A named visual rendering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub is_premium: bool,
}

pub const DEFAULT_TEMPLATE_ID: &str = "minimal";

/// The full catalog, free templates first.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "minimal",
        name: "Minimal",
        description: "Clean and simple design focusing on content",
        is_premium: false,
    },
    Template {
        id: "professional",
        name: "Professional",
        description: "Traditional format ideal for corporate roles",
        is_premium: false,
    },
    Template {
        id: "creative",
        name: "Creative",
        description: "Colorful and dynamic layout for creative fields",
        is_premium: false,
    },
    Template {
        id: "premium-modern",
        name: "Modern Premium",
        description: "Sleek, contemporary design with advanced layout",
        is_premium: true,
    },
    Template {
        id: "premium-executive",
        name: "Executive Premium",
        description: "Elegant design for senior professionals and executives",
        is_premium: true,
    },
    Template {
        id: "premium-creative",
        name: "Creative Premium",
        description: "Bold, innovative design for creative industries",
        is_premium: true,
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Whether a user on `tier` may select `template`.
///
/// Only the exact `premium` tier unlocks premium templates. `admin` is not a
/// superset of `premium` here.
pub fn can_select(template: &Template, tier: UserTier) -> bool {
    !template.is_premium || tier == UserTier::Premium
}

/// Resolve `template_id` and apply the tier gate.
///
/// Unknown ids are a validation error; gated templates are forbidden.
pub fn authorize_selection(
    template_id: &str,
    tier: UserTier,
) -> Result<&'static Template, CoreError> {
    let template = find_template(template_id).ok_or_else(|| {
        CoreError::Validation(format!("Unknown template '{template_id}'"))
    })?;
    if !can_select(template, tier) {
        return Err(CoreError::Forbidden(
            "This template is only available to premium users. \
             Please upgrade your account to access it."
                .into(),
        ));
    }
    Ok(template)
}
