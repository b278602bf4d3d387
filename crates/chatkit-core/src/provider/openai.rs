//! reqwest-backed [`ProviderClient`] for the OpenAI API.

use async_trait::async_trait;
use chatkit_types::protocol::{
    ResponseCreateRequest, ResponseObject, ThreadCreateRequest, ThreadObject,
};
use chatkit_types::RelayConfig;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client_builder::build_http_client;
use super::error_parsing::classify_error;
use super::{ProviderCallError, ProviderCallResult, ProviderClient};
use crate::error::{AppError, AppResult};

pub const OP_SESSION_RESPONSE: &str = "chatkit.sessions.responses.create";
pub const OP_THREAD_CREATE: &str = "threads.create";
pub const OP_THREAD_RESPONSE: &str = "threads.responses.create";
pub const OP_RESPONSE: &str = "responses.create";

const OPENAI_BETA: &str = "openai-beta";
const CHATKIT_BETA: &str = "chatkit_beta=v1";

pub struct OpenAiClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with a pre-built `reqwest::Client`.
    pub fn new(http_client: Client, base_url: &str, api_key: impl Into<String>) -> AppResult<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| AppError::Provider(format!("Invalid OpenAI base URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::Provider(format!(
                "OpenAI base URL '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self { http_client, base_url: parsed, api_key: api_key.into() })
    }

    /// Build the client from config. `Ok(None)` when no API key is set.
    pub fn from_config(config: &RelayConfig) -> AppResult<Option<Self>> {
        let Some(api_key) =
            config.openai_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
        else {
            return Ok(None);
        };

        let http_client =
            build_http_client(config.upstream_proxy.as_deref(), config.request_timeout)?;

        Self::new(http_client, &config.openai_base_url, api_key).map(Some)
    }

    fn endpoint(&self, segments: &[&str]) -> ProviderCallResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ProviderCallError::Transport(format!("unusable base URL {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn headers(&self, chatkit_beta: bool) -> ProviderCallResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| ProviderCallError::Transport(format!("invalid API key header: {}", e)))?,
        );
        if chatkit_beta {
            headers.insert(OPENAI_BETA, HeaderValue::from_static(CHATKIT_BETA));
        }
        Ok(headers)
    }

    async fn post_json<B, T>(
        &self,
        operation: &str,
        url: Url,
        body: &B,
        chatkit_beta: bool,
    ) -> ProviderCallResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {} ({})", url.path(), operation);

        let response = self
            .http_client
            .post(url)
            .headers(self.headers(chatkit_beta)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderCallError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderCallError::Transport(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            let err = classify_error(operation, status.as_u16(), &text);
            tracing::debug!("{} returned {}: {}", operation, status, err);
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| ProviderCallError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    async fn create_session_response(
        &self,
        session_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        let url = self.endpoint(&["chatkit", "sessions", session_id, "responses"])?;
        self.post_json(OP_SESSION_RESPONSE, url, request, true).await
    }

    async fn create_thread(&self, request: &ThreadCreateRequest) -> ProviderCallResult<ThreadObject> {
        let url = self.endpoint(&["threads"])?;
        self.post_json(OP_THREAD_CREATE, url, request, true).await
    }

    async fn create_thread_response(
        &self,
        thread_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        let url = self.endpoint(&["threads", thread_id, "responses"])?;
        self.post_json(OP_THREAD_RESPONSE, url, request, true).await
    }

    async fn create_response(
        &self,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        let url = self.endpoint(&["responses"])?;
        self.post_json(OP_RESPONSE, url, request, false).await
    }
}
