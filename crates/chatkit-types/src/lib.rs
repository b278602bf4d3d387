//! # ChatKit Types
//!
//! Models, provider wire types, and error definitions for the ChatKit relay.
//!
//! - **`error`** - Typed errors for the relay boundary and configuration
//! - **`models`** - Inbound/outbound chat models, health report, relay config
//! - **`protocol`** - Responses API request/response bodies
//!
//! ## Architecture Role
//!
//! ```text
//!          chatkit-types (this crate)
//!                  │
//!                  ▼
//!            chatkit-core
//!                  │
//!                  ▼
//!           chatkit-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, RelayError};

pub use models::{
    Attachment, ChatRequest, ChatResponse, ContentPart, DatabaseStatus, HealthReport,
    MessageRole, NormalizedMessage, ProviderResult, ProviderStatus, RelayConfig,
};
