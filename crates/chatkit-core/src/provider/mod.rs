//! Provider module - client interface for the LLM provider
//!
//! [`ProviderClient`] exposes one method per call shape the dispatcher knows
//! about. [`OpenAiClient`] speaks HTTP/JSON to the OpenAI API; tests drive the
//! dispatcher through `stub::ScriptedProvider`.

pub mod client_builder;
pub mod error_parsing;
pub mod openai;
#[cfg(any(test, feature = "test-utils"))]
pub mod stub;

use async_trait::async_trait;
use chatkit_types::protocol::{
    ResponseCreateRequest, ResponseObject, ThreadCreateRequest, ThreadObject,
};
use thiserror::Error;

pub use openai::OpenAiClient;

/// Classified failure of a single provider call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderCallError {
    /// The provider has no such operation for this client version
    #[error("operation '{operation}' not supported by provider")]
    Unsupported { operation: String },

    /// The provider rejected a request field it does not know
    #[error("unknown parameter '{param}': {message}")]
    UnknownParameter { param: String, message: String },

    /// Any other non-success answer
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Network-level failure, no answer received
    #[error("transport error: {0}")]
    Transport(String),

    /// Success status with a body that is not the expected object
    #[error("invalid provider response: {0}")]
    Decode(String),
}

impl ProviderCallError {
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported { operation: operation.into() }
    }

    pub fn unknown_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnknownParameter { param: param.into(), message: message.into() }
    }

    /// The only signal that moves the dispatcher to the next strategy.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// True when `name` (or a field nested under it) was rejected as unknown.
    pub fn rejects_param(&self, name: &str) -> bool {
        match self {
            Self::UnknownParameter { param, .. } => {
                param == name
                    || param.strip_prefix(name).is_some_and(|rest| {
                        rest.starts_with('.') || rest.starts_with('[')
                    })
            },
            _ => false,
        }
    }
}

pub type ProviderCallResult<T> = Result<T, ProviderCallError>;

/// Operation families offered by the provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Response bound to an existing session.
    async fn create_session_response(
        &self,
        session_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject>;

    /// Thread bound to a session.
    async fn create_thread(&self, request: &ThreadCreateRequest) -> ProviderCallResult<ThreadObject>;

    /// Response on a previously created thread.
    async fn create_thread_response(
        &self,
        thread_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject>;

    /// Generic, non-session-bound response.
    async fn create_response(
        &self,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject>;
}
