//! Portfolio content document.
//!
//! Content is stored as a JSONB document on the portfolio row. Over its
//! lifetime the document has been written by the form editor, by the import
//! flow, and by older clients that predate the schema version stamp, so reads
//! never trust its shape. [`safe_parse_portfolio_content`] turns any stored
//! value into a fully populated [`PortfolioContent`]; it cannot fail.
//!
//! The write path stores [`PortfolioContent::to_stored_value`], which is the
//! normalized document stamped with [`CURRENT_SCHEMA_VERSION`].

mod migrate;
mod schema;

pub use migrate::{detect_version, migrate_to_current, CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
pub use schema::{PersonalInfo, PortfolioContent, Proficiency, Project, SkillEntry};

use serde_json::Value;

/// Normalize any stored JSON value into a complete content document.
///
/// Objects are shallow-merged over [`PortfolioContent::default`]: each
/// top-level field present in the input replaces the default wholesale.
/// Anything that is not an object yields the default.
pub fn safe_parse_portfolio_content(value: &Value) -> PortfolioContent {
    match value {
        Value::Object(map) => {
            let (_, current) = migrate_to_current(map.clone());
            schema::decode_current(&current)
        }
        _ => PortfolioContent::default(),
    }
}

/// Normalize an optional stored value. A missing column behaves like `null`.
pub fn safe_parse_optional(value: Option<&Value>) -> PortfolioContent {
    value.map_or_else(PortfolioContent::default, safe_parse_portfolio_content)
}
