//! Content schema versions and the migrations between them.
//!
//! Version 0 is any document without a `schemaVersion` stamp: whatever the
//! editor of the day wrote. Version 1 is the eight-field document with every
//! top-level field present. Each step is a pure function from one version's
//! object to the next; [`migrate_to_current`] composes them.

use serde_json::{Map, Value};

use super::schema::PortfolioContent;

pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

type Migration = fn(Map<String, Value>) -> Map<String, Value>;

/// `MIGRATIONS[n]` upgrades a version `n` document to version `n + 1`.
const MIGRATIONS: &[Migration] = &[v0_to_v1];

/// Read the version stamp. Missing or non-integer stamps are version 0.
pub fn detect_version(doc: &Map<String, Value>) -> u32 {
    doc.get(SCHEMA_VERSION_KEY)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Run every migration from the document's version up to the current one.
///
/// Returns the version the document started at alongside the migrated
/// object. Documents stamped with a newer version than this build knows are
/// passed through untouched and decoded field by field.
pub fn migrate_to_current(mut doc: Map<String, Value>) -> (u32, Map<String, Value>) {
    let from = detect_version(&doc);
    for step in MIGRATIONS.iter().skip(from as usize) {
        doc = step(doc);
    }
    (from, doc)
}

/// Shallow merge over the canonical default. Input wins per top-level key.
fn v0_to_v1(doc: Map<String, Value>) -> Map<String, Value> {
    let mut merged = match PortfolioContent::default().to_stored_value() {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in doc {
        if key != SCHEMA_VERSION_KEY {
            merged.insert(key, value);
        }
    }
    merged.insert(SCHEMA_VERSION_KEY.into(), Value::from(1u32));
    merged
}
