//! Domain models for the ChatKit relay.

mod chat;
mod config;
mod health;

pub use chat::{
    Attachment, ChatRequest, ChatResponse, ContentPart, MessageRole, NormalizedMessage,
    ProviderResult,
};
pub use config::RelayConfig;
pub use health::{DatabaseStatus, HealthReport, ProviderStatus};
