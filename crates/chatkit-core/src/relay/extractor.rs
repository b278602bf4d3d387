//! Response → [`ProviderResult`] extraction.

use chatkit_types::protocol::ResponseObject;
use chatkit_types::ProviderResult;
use serde_json::Value;

const TEXT_PART_TYPES: &[&str] = &["output_text", "text"];

/// Top-level `output_text`, else the first text part of the first output item,
/// else `""`.
pub fn extract_output_text(response: &ResponseObject) -> String {
    if let Some(text) = response.output_text().filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    response
        .first_output_item()
        .and_then(|item| {
            item.content
                .iter()
                .filter(|part| TEXT_PART_TYPES.contains(&part.kind.as_str()))
                .find_map(|part| part.text_value().map(str::to_string))
        })
        .unwrap_or_default()
}

/// The provider body as received; `None` when it is not a JSON object.
pub fn serialize_payload(response: &ResponseObject) -> Option<Value> {
    match response.as_value() {
        Value::Object(_) => Some(response.as_value().clone()),
        other => {
            tracing::warn!("Provider response is not an object, dropping raw payload: {}", other);
            None
        },
    }
}

pub fn extract_result(response: &ResponseObject) -> ProviderResult {
    ProviderResult {
        output_text: extract_output_text(response),
        response_id: response.id().map(str::to_string),
        raw_payload: serialize_payload(response),
    }
}
