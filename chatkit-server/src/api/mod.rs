//! API Routes

pub mod chat;
pub mod error;
pub mod health;


use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use error::ErrorBody;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chatkit/message", post(chat::post_message))
        .route("/health", get(health::health_check))
        .route("/healthz", get(health::health_check))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}
