//! Removal of retrieval identifiers from raw payloads.

use serde_json::Value;

pub const REDACTED_KEYS: &[&str] =
    &["file_id", "file_ids", "vector_store_id", "vector_store_ids", "tool_resources"];

/// Strip every [`REDACTED_KEYS`] entry from mappings at any depth, including
/// mappings nested in sequences. Returns the number of keys removed.
pub fn redact_retrieval_fields(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let before = map.len();
            map.retain(|key, _| !REDACTED_KEYS.contains(&key.as_str()));
            let mut removed = before - map.len();
            for child in map.values_mut() {
                removed += redact_retrieval_fields(child);
            }
            removed
        },
        Value::Array(items) => items.iter_mut().map(redact_retrieval_fields).sum(),
        _ => 0,
    }
}
