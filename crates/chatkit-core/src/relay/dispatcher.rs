//! Ordered strategy fallback against the provider.
//!
//! Each strategy runs at most twice: once as built, and once more without
//! `tool_resources` when the provider rejects that field as unknown. Only an
//! "unsupported operation" answer moves on to the next strategy; any other
//! failure ends the dispatch.

use chatkit_types::protocol::{ResponseCreateRequest, ResponseObject, ThreadCreateRequest, Tool};
use chatkit_types::RelayError;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::metadata::{base_metadata, fallback_metadata, AttemptError};
use super::normalizer::NormalizedRequest;
use super::strategy::CallStrategy;
use crate::provider::{ProviderCallError, ProviderCallResult, ProviderClient};

const TOOL_RESOURCES_PARAM: &str = "tool_resources";

/// Successful dispatch.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub strategy: CallStrategy,
    pub response: ResponseObject,
    pub attempted: Vec<CallStrategy>,
}

/// Terminal dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub last_error: ProviderCallError,
    pub attempted: Vec<CallStrategy>,
}

impl From<DispatchError> for RelayError {
    fn from(err: DispatchError) -> Self {
        RelayError::Provider {
            message: err.last_error.to_string(),
            attempted: err.attempted.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}

pub struct Dispatcher {
    provider: Arc<dyn ProviderClient>,
    model: String,
    strategies: Vec<CallStrategy>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn ProviderClient>, model: impl Into<String>) -> Self {
        Self { provider, model: model.into(), strategies: CallStrategy::ORDERED.to_vec() }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn dispatch(
        &self,
        request: &NormalizedRequest,
        trace_id: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let mut attempted = Vec::with_capacity(self.strategies.len());
        let mut fallback_errors: Vec<AttemptError> = Vec::new();
        let mut last_error: Option<ProviderCallError> = None;

        for &strategy in &self.strategies {
            attempted.push(strategy);
            debug!("[{}] Trying strategy {}", trace_id, strategy);

            match self.run_strategy(strategy, request, &fallback_errors, trace_id).await {
                Ok(response) => {
                    if fallback_errors.is_empty() {
                        debug!("[{}] Strategy {} succeeded", trace_id, strategy);
                    } else {
                        info!(
                            "[{}] Fallback strategy {} succeeded after {} unsupported",
                            trace_id,
                            strategy,
                            fallback_errors.len()
                        );
                    }
                    return Ok(DispatchOutcome { strategy, response, attempted });
                },
                Err(err) if err.is_unsupported() => {
                    warn!("[{}] Strategy {} unsupported, trying next: {}", trace_id, strategy, err);
                    fallback_errors.push(AttemptError { strategy, message: err.to_string() });
                    last_error = Some(err);
                },
                Err(err) => {
                    error!("[{}] Strategy {} failed: {}", trace_id, strategy, err);
                    return Err(DispatchError { last_error: err, attempted });
                },
            }
        }

        let last_error =
            last_error.unwrap_or_else(|| ProviderCallError::unsupported("no call strategies"));
        error!("[{}] All strategies exhausted: {}", trace_id, last_error);
        Err(DispatchError { last_error, attempted })
    }

    async fn run_strategy(
        &self,
        strategy: CallStrategy,
        request: &NormalizedRequest,
        prior_errors: &[AttemptError],
        trace_id: &str,
    ) -> ProviderCallResult<ResponseObject> {
        let body = build_request_body(strategy, request, &self.model, prior_errors);
        let mut thread_id: Option<String> = None;

        match self.call(strategy, request, &body, &mut thread_id).await {
            Err(err) if body.tool_resources.is_some() && err.rejects_param(TOOL_RESOURCES_PARAM) => {
                warn!(
                    "[{}] {} rejected tool_resources, retrying without it: {}",
                    trace_id, strategy, err
                );
                let retry = ResponseCreateRequest { tool_resources: None, ..body };
                self.call(strategy, request, &retry, &mut thread_id).await
            },
            other => other,
        }
    }

    async fn call(
        &self,
        strategy: CallStrategy,
        request: &NormalizedRequest,
        body: &ResponseCreateRequest,
        thread_id: &mut Option<String>,
    ) -> ProviderCallResult<ResponseObject> {
        match strategy {
            CallStrategy::SessionScoped => {
                self.provider.create_session_response(&request.session_id, body).await
            },
            CallStrategy::ThreadScoped => {
                // A retry reuses the thread created by the first attempt.
                let id = if let Some(id) = thread_id.clone() {
                    id
                } else {
                    let thread = self
                        .provider
                        .create_thread(&ThreadCreateRequest {
                            session_id: request.session_id.clone(),
                            metadata: base_metadata(request),
                        })
                        .await?;
                    *thread_id = Some(thread.id.clone());
                    thread.id
                };
                self.provider.create_thread_response(&id, body).await
            },
            CallStrategy::Stateless => self.provider.create_response(body).await,
        }
    }
}

/// Shape the shared request for one strategy's capabilities.
pub fn build_request_body(
    strategy: CallStrategy,
    request: &NormalizedRequest,
    model: &str,
    prior_errors: &[AttemptError],
) -> ResponseCreateRequest {
    let mut message = request.message.clone();
    if !strategy.supports_attachment_tools() {
        for attachment in &mut message.attachments {
            attachment.tools.clear();
        }
    }

    let mut tools = request.tools.clone();
    let tool_resources = if strategy.supports_tool_resources() {
        request.tool_resources.clone()
    } else {
        if let Some(resources) = &request.tool_resources {
            fold_vector_stores(&mut tools, resources.vector_store_ids());
        }
        None
    };

    let metadata = if strategy.is_session_bound() {
        base_metadata(request)
    } else {
        fallback_metadata(request, prior_errors)
    };

    ResponseCreateRequest {
        model: model.to_string(),
        input: vec![message],
        tools,
        tool_resources,
        metadata,
    }
}

/// Attach vector store ids to the `file_search` tool itself.
fn fold_vector_stores(tools: &mut Vec<Tool>, vector_store_ids: &[String]) {
    if vector_store_ids.is_empty() {
        return;
    }
    if !tools.iter().any(Tool::is_file_search) {
        tools.push(Tool::file_search());
    }
    for tool in tools.iter_mut().filter(|t| t.is_file_search()) {
        for id in vector_store_ids {
            if !tool.vector_store_ids.contains(id) {
                tool.vector_store_ids.push(id.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
