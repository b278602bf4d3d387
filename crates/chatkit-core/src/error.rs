//! Unified error types for ChatKit Core startup paths.

use chatkit_types::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Error type for everything that happens outside a single relay call:
/// config loading, client construction, pool setup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Database operation failed (Postgres pool).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client construction or request failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider client could not be set up.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for ChatKit startup operations.
pub type AppResult<T> = Result<T, AppError>;
