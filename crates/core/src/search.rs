//! Listing and search helpers shared by the community feed and admin lists.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for the community feed.
pub const DEFAULT_FEED_LIMIT: i64 = 24;

/// Default page size for owner and admin lists.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for any list endpoint.
pub const MAX_LIST_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Turn free text into an `ILIKE` pattern matching it anywhere.
///
/// `%`, `_` and `\` are escaped so they match literally. Blank input returns
/// `None` so callers can skip the filter entirely.
///
/// ```
/// use folio_core::search::ilike_contains;
/// assert_eq!(ilike_contains(" rust "), Some("%rust%".to_string()));
/// assert_eq!(ilike_contains("50%"), Some("%50\\%%".to_string()));
/// assert_eq!(ilike_contains("  "), None);
/// ```
pub fn ilike_contains(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Trim an optional filter value, treating blank as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
