//! Inbound payload validation and reshaping.

use chatkit_types::protocol::{Tool, ToolResources};
use chatkit_types::{
    Attachment, ChatRequest, ContentPart, MessageRole, NormalizedMessage, RelayError,
};
use serde_json::Value;
use tracing::debug;

/// Everything the dispatcher needs, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub session_id: String,
    pub message: NormalizedMessage,
    /// `[file_search]` when tool use is on, empty otherwise
    pub tools: Vec<Tool>,
    pub tool_resources: Option<ToolResources>,
    pub use_tools: bool,
    pub retrieval_disabled: bool,
    /// Requested vector store; always `None` when retrieval is disabled
    pub vector_store_id: Option<String>,
}

/// Parse a raw JSON body into a [`ChatRequest`].
///
/// Type mismatches are client errors, reported as validation failures.
pub fn parse_chat_request(body: Value) -> Result<ChatRequest, RelayError> {
    serde_json::from_value(body)
        .map_err(|e| RelayError::validation(format!("invalid request body: {}", e)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn normalize(
    request: ChatRequest,
    retrieval_disabled: bool,
) -> Result<NormalizedRequest, RelayError> {
    let (Some(session_id), Some(text)) = (non_blank(request.session_id), non_blank(request.text))
    else {
        return Err(RelayError::missing_fields());
    };

    let file_ids: Vec<String> =
        request.staged_file_ids.into_iter().filter(|id| !id.trim().is_empty()).collect();
    let vector_store_id = non_blank(request.vector_store_id);

    debug!(
        "Resolved retrieval config: file_ids={:?} vector_store_id={:?} retrieval_disabled={}",
        file_ids, vector_store_id, retrieval_disabled
    );

    let attachments: Vec<Attachment> = file_ids
        .into_iter()
        .map(|id| {
            if retrieval_disabled {
                Attachment::bare(id)
            } else {
                Attachment::with_file_search(id)
            }
        })
        .collect();

    let use_tools = !retrieval_disabled && (vector_store_id.is_some() || !attachments.is_empty());

    let tools = if use_tools { vec![Tool::file_search()] } else { Vec::new() };
    let tool_resources = if retrieval_disabled {
        None
    } else {
        vector_store_id.as_deref().map(ToolResources::file_search)
    };

    Ok(NormalizedRequest {
        session_id,
        message: NormalizedMessage {
            role: MessageRole::User,
            content_parts: vec![ContentPart::input_text(text)],
            attachments,
        },
        tools,
        tool_resources,
        use_tools,
        retrieval_disabled,
        vector_store_id: vector_store_id.filter(|_| !retrieval_disabled),
    })
}
