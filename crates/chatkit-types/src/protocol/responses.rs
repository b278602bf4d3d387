//! OpenAI Responses API types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::null_as_default;
use crate::models::NormalizedMessage;

pub const FILE_SEARCH_TOOL: &str = "file_search";

/// Provider metadata. Values are always plain strings on the wire.
pub type Metadata = BTreeMap<String, String>;

/// Tool definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vector_store_ids: Vec<String>,
}

impl Tool {
    pub fn file_search() -> Self {
        Self { kind: FILE_SEARCH_TOOL.to_string(), vector_store_ids: Vec::new() }
    }

    pub fn is_file_search(&self) -> bool {
        self.kind == FILE_SEARCH_TOOL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSearchResources {
    pub vector_store_ids: Vec<String>,
}

/// `{"file_search": {"vector_store_ids": [...]}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_search: Option<FileSearchResources>,
}

impl ToolResources {
    pub fn file_search(vector_store_id: impl Into<String>) -> Self {
        Self {
            file_search: Some(FileSearchResources { vector_store_ids: vec![vector_store_id.into()] }),
        }
    }

    pub fn vector_store_ids(&self) -> &[String] {
        self.file_search.as_ref().map_or(&[], |fs| fs.vector_store_ids.as_slice())
    }
}

/// Body shared by every response-creation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseCreateRequest {
    pub model: String,
    pub input: Vec<NormalizedMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadCreateRequest {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadObject {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response object, held exactly as the provider sent it.
///
/// Only `id`, `output_text` and the first output item are read back out; the
/// document itself is never rebuilt, so it can be echoed to the caller as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResponseObject(Value);

impl ResponseObject {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn output_text(&self) -> Option<&str> {
        self.0.get("output_text").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First entry of `output`, if it parses as an output item.
    pub fn first_output_item(&self) -> Option<OutputItem> {
        let first = self.0.get("output")?.as_array()?.first()?;
        serde_json::from_value(first.clone()).ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<OutputContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One content part of an output item.
///
/// `text` is either a plain string or an object carrying the string under
/// `value`, depending on the API generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputContent {
    pub fn text_value(&self) -> Option<&str> {
        match self.text.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("value").and_then(Value::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_resources_shape() {
        let value = serde_json::to_value(ToolResources::file_search("vs1")).unwrap();
        assert_eq!(value, json!({"file_search": {"vector_store_ids": ["vs1"]}}));
    }

    #[test]
    fn test_response_object_keeps_unknown_fields() {
        let raw = json!({
            "id": "r1",
            "object": "response",
            "output_text": "hi there",
            "output": [{"type": "message", "content": [{"type": "output_text", "text": "hi there", "annotations": []}]}],
            "usage": {"total_tokens": 12}
        });

        let parsed: ResponseObject = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.id(), Some("r1"));
        assert_eq!(parsed.first_output_item().unwrap().content[0].text_value(), Some("hi there"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_response_object_keeps_nulls_and_empty_arrays() {
        let raw = json!({
            "id": "r1",
            "object": "response",
            "output": [],
            "output_text": null,
            "status": "completed"
        });

        let parsed: ResponseObject = serde_json::from_value(raw.clone()).unwrap();
        assert!(parsed.output_text().is_none());
        assert!(parsed.first_output_item().is_none());
        assert_eq!(parsed.into_value(), raw);
    }

    #[test]
    fn test_response_object_tolerates_nulls() {
        let parsed = ResponseObject::new(json!({"id": null, "output_text": null, "output": null}));
        assert!(parsed.id().is_none());
        assert!(parsed.first_output_item().is_none());
    }

    #[test]
    fn test_output_item_null_content_is_empty() {
        let item: OutputItem =
            serde_json::from_value(json!({"type": "message", "content": null})).unwrap();
        assert!(item.content.is_empty());
    }

    #[test]
    fn test_text_value_from_object() {
        let part: OutputContent =
            serde_json::from_value(json!({"type": "text", "text": {"value": "hello"}})).unwrap();
        assert_eq!(part.text_value(), Some("hello"));
    }

    #[test]
    fn test_request_omits_empty_fields() {
        let req = ResponseCreateRequest {
            model: "gpt-4o-mini".to_string(),
            input: vec![],
            tools: vec![],
            tool_resources: None,
            metadata: Metadata::new(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_resources").is_none());
        assert!(value.get("metadata").is_none());
    }
}
