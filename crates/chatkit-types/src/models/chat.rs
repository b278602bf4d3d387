//! Chat relay request, message, and result models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{null_as_default, Tool};

/// Inbound payload for the chat message endpoint.
///
/// `session_id` and `text` stay optional at the wire level so that a missing
/// field becomes a validation error instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub staged_file_ids: Vec<String>,
    #[serde(default)]
    pub vector_store_id: Option<String>,
}

/// Message author role. The relay only ever sends user turns.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    #[default]
    User,
}

/// One typed content part of a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ContentPart {
    pub fn input_text(text: impl Into<String>) -> Self {
        Self { kind: "input_text".to_string(), text: text.into() }
    }
}

/// Reference to a previously uploaded file, optionally bound to tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl Attachment {
    pub fn bare(file_id: impl Into<String>) -> Self {
        Self { file_id: file_id.into(), tools: Vec::new() }
    }

    pub fn with_file_search(file_id: impl Into<String>) -> Self {
        Self { file_id: file_id.into(), tools: vec![Tool::file_search()] }
    }
}

/// Provider-ready user message. Built once per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedMessage {
    pub role: MessageRole,
    #[serde(rename = "content")]
    pub content_parts: Vec<ContentPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Normalized outcome of whichever strategy succeeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderResult {
    /// Never null; empty when the provider produced no text
    pub output_text: String,
    pub response_id: Option<String>,
    pub raw_payload: Option<Value>,
}

/// Success body of the chat message endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub text: String,
    pub response_id: Option<String>,
    pub raw: Option<Value>,
}

impl From<ProviderResult> for ChatResponse {
    fn from(result: ProviderResult) -> Self {
        Self { text: result.output_text, response_id: result.response_id, raw: result.raw_payload }
    }
}
