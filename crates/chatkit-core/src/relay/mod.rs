//! Relay pipeline: normalize → dispatch → extract → redact.

pub mod dispatcher;
pub mod extractor;
pub mod metadata;
pub mod normalizer;
pub mod redaction;
pub mod strategy;


use chatkit_types::{ChatRequest, ProviderResult, RelayConfig, RelayError};
use std::sync::Arc;
use tracing::info;

use crate::error::AppResult;
use crate::provider::{OpenAiClient, ProviderClient};

pub use dispatcher::{DispatchError, DispatchOutcome, Dispatcher};
pub use extractor::{extract_output_text, extract_result};
pub use metadata::{base_metadata, fallback_metadata, AttemptError, MetadataBuilder};
pub use normalizer::{normalize, parse_chat_request, NormalizedRequest};
pub use redaction::{redact_retrieval_fields, REDACTED_KEYS};
pub use strategy::CallStrategy;

/// Correlation id for one relayed request.
pub fn new_trace_id() -> String {
    format!("chatkit_{}", chrono::Utc::now().timestamp_micros())
}

/// Entry point for one chat message.
pub struct ChatRelay {
    dispatcher: Dispatcher,
    retrieval_disabled: bool,
}

impl ChatRelay {
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        model: impl Into<String>,
        retrieval_disabled: bool,
    ) -> Self {
        Self { dispatcher: Dispatcher::new(provider, model), retrieval_disabled }
    }

    /// `Ok(None)` when no provider credentials are configured.
    pub fn from_config(config: &RelayConfig) -> AppResult<Option<Self>> {
        let Some(client) = OpenAiClient::from_config(config)? else {
            return Ok(None);
        };
        Ok(Some(Self::new(Arc::new(client), config.model.clone(), config.retrieval_disabled)))
    }

    pub fn retrieval_disabled(&self) -> bool {
        self.retrieval_disabled
    }

    pub fn model(&self) -> &str {
        self.dispatcher.model()
    }

    pub async fn relay(&self, request: ChatRequest) -> Result<ProviderResult, RelayError> {
        let trace_id = new_trace_id();
        let normalized = normalize(request, self.retrieval_disabled)?;

        info!(
            "[{}] Relaying message for session {} (attachments={}, use_tools={})",
            trace_id,
            normalized.session_id,
            normalized.message.attachments.len(),
            normalized.use_tools
        );

        let outcome = self.dispatcher.dispatch(&normalized, &trace_id).await?;
        let mut result = extract_result(&outcome.response);

        if self.retrieval_disabled {
            if let Some(raw) = result.raw_payload.as_mut() {
                let removed = redact_retrieval_fields(raw);
                if removed > 0 {
                    tracing::debug!("[{}] Redacted {} retrieval fields", trace_id, removed);
                }
            }
        }

        info!(
            "[{}] Completed via {} (response_id={:?})",
            trace_id, outcome.strategy, result.response_id
        );
        Ok(result)
    }
}
