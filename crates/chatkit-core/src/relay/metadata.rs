//! Provider metadata building.
//!
//! The provider only accepts string values, so everything goes through
//! [`coerce_value`] first.

use chatkit_types::protocol::Metadata;
use serde_json::{json, Value};

use super::normalizer::NormalizedRequest;
use super::strategy::CallStrategy;
use crate::provider::error_parsing::{truncate_message, MAX_ERROR_MESSAGE_CHARS};

pub const MAX_METADATA_VALUE_CHARS: usize = MAX_ERROR_MESSAGE_CHARS;

/// Failure of a strategy that handed over to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptError {
    pub strategy: CallStrategy,
    pub message: String,
}

/// String form of a metadata value; `None` means omit the key.
pub fn coerce_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct MetadataBuilder {
    entries: Metadata,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: &str, value: Value) -> Self {
        if let Some(s) = coerce_value(&value) {
            self.entries.insert(key.to_string(), truncate_message(&s, MAX_METADATA_VALUE_CHARS));
        }
        self
    }

    pub fn build(self) -> Metadata {
        self.entries
    }
}

/// Metadata every strategy sends.
pub fn base_metadata(request: &NormalizedRequest) -> Metadata {
    MetadataBuilder::new()
        .insert("session_id", json!(request.session_id))
        .insert("retrieval_disabled", json!(request.retrieval_disabled))
        .insert("use_tools", json!(request.use_tools))
        .insert("vector_store_id", json!(request.vector_store_id))
        .insert("attachment_count", json!(request.message.attachments.len()))
        .build()
}

/// Base metadata plus one `fallback_error_N` entry per earlier failure.
///
/// Used by the call that is not bound to the session, so `session_id` is
/// left out.
pub fn fallback_metadata(request: &NormalizedRequest, errors: &[AttemptError]) -> Metadata {
    let mut builder = MetadataBuilder::new();
    for (idx, err) in errors.iter().enumerate() {
        builder = builder.insert(
            &format!("fallback_error_{}", idx + 1),
            json!(format!("{}: {}", err.strategy, err.message)),
        );
    }
    let mut metadata = base_metadata(request);
    metadata.remove("session_id");
    metadata.extend(builder.build());
    metadata
}
