//! Relay boundary errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detail returned when the inbound payload lacks a session or message.
pub const MISSING_FIELDS_MESSAGE: &str = "missing session_id or text";

/// Errors a chat relay request can surface to the client.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RelayError {
    /// Client supplied an incomplete or malformed request
    #[error("{message}")]
    Validation { message: String },

    /// Every applicable strategy failed, or the provider rejected the call
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        /// Strategies tried, in order
        attempted: Vec<String>,
    },

    /// No provider client was configured at startup
    #[error("OpenAI client not configured")]
    ProviderUnavailable,

    /// Anything else caught at the boundary
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn missing_fields() -> Self {
        Self::validation(MISSING_FIELDS_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Provider { .. } | Self::ProviderUnavailable | Self::Internal { .. } => 500,
        }
    }
}
