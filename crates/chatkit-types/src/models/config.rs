//! Relay server configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 300;

/// Full relay configuration, resolved once at startup.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct RelayConfig {
    /// Interface to bind
    #[validate(length(min = 1_u64))]
    pub bind_address: String,
    /// Port to listen on
    #[validate(range(min = 1_u16))]
    pub port: u16,
    /// Provider API key; the relay endpoint answers 500 without it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    /// Provider API base URL
    #[validate(url)]
    pub openai_base_url: String,
    /// Model identifier sent with every call
    #[validate(length(min = 1_u64))]
    pub model: String,
    /// Administratively disable retrieval (file_search, attachments' tools)
    pub retrieval_disabled: bool,
    /// Optional Postgres URL; the pool is only reported by the health endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Provider request timeout in seconds
    #[validate(range(min = 30_u64, max = 3600_u64))]
    pub request_timeout: u64,
    /// Optional HTTP(S)/SOCKS proxy for provider calls
    pub upstream_proxy: Option<String>,
    /// CORS origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn get_bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn openai_configured(&self) -> bool {
        self.openai_api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            retrieval_disabled: false,
            database_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            upstream_proxy: None,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("retrieval_disabled", &self.retrieval_disabled)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("upstream_proxy", &self.upstream_proxy)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}
