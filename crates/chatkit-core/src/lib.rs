//! # ChatKit Core
//!
//! Relay logic between a chat front-end and the OpenAI Responses API.
//!
//! ```text
//! chatkit-core/src/
//! ├── relay/        # normalizer, strategies, dispatcher, extractor, redaction
//! ├── provider/     # ProviderClient trait + reqwest OpenAI client
//! ├── config.rs     # JSON config file loading + validation
//! ├── database.rs   # optional Postgres pool (health reporting only)
//! └── error.rs      # AppError for startup paths
//! ```
//!
//! Per request: `ChatRequest` → [`relay::normalize`] → [`relay::Dispatcher`] →
//! [`relay::extract_result`] → [`relay::redact_retrieval_fields`] (when
//! retrieval is disabled) → `ProviderResult`.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod database;
pub mod error;
pub mod provider;
pub mod relay;

pub use database::DatabasePool;
pub use error::{AppError, AppResult};
pub use provider::{OpenAiClient, ProviderCallError, ProviderClient};
pub use relay::{CallStrategy, ChatRelay, Dispatcher};
