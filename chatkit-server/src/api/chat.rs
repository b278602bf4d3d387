//! `POST /chatkit/message`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use chatkit_core::relay::{normalize, parse_chat_request};
use chatkit_types::{ChatResponse, RelayError};
use serde_json::Value;

use super::error::ApiError;
use crate::state::AppState;

pub async fn post_message(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = body
        .map_err(|e| RelayError::validation(format!("invalid request body: {}", e.body_text())))?;
    let request = parse_chat_request(body)?;

    let Some(relay) = state.relay() else {
        // Malformed input is still reported as such without a provider.
        normalize(request, state.config().retrieval_disabled)?;
        return Err(RelayError::ProviderUnavailable.into());
    };

    let result = relay.relay(request).await?;
    Ok(Json(ChatResponse::from(result)))
}
