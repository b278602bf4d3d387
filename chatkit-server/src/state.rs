//! Application State
//!
//! Holds the process-wide relay, the optional database pool and the resolved
//! config. Built once at startup and shared by every handler.

use std::sync::Arc;

use chatkit_core::{AppResult, ChatRelay, DatabasePool};
use chatkit_types::{HealthReport, RelayConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: RelayConfig,
    pub relay: Option<Arc<ChatRelay>>,
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Create AppState with pre-initialized components
    pub fn new_with_components(
        config: RelayConfig,
        relay: Option<Arc<ChatRelay>>,
        database: Option<DatabasePool>,
    ) -> Self {
        Self { inner: Arc::new(AppStateInner { config, relay, database }) }
    }

    /// Build the provider client and database pool from config.
    ///
    /// A missing API key leaves the relay unset. A database that cannot be
    /// reached is logged and left unset; neither stops the server.
    pub async fn from_config(config: RelayConfig) -> AppResult<Self> {
        let relay = ChatRelay::from_config(&config)?.map(Arc::new);
        match &relay {
            Some(relay) => tracing::info!(
                "🤖 OpenAI client ready (model={}, retrieval_disabled={})",
                relay.model(),
                relay.retrieval_disabled()
            ),
            None => tracing::warn!(
                "⚠️ OPENAI_API_KEY not set, /chatkit/message will answer 500 until configured"
            ),
        }

        let database = match config.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => match DatabasePool::connect(url).await {
                Ok(pool) => {
                    tracing::info!("🗄️ Database pool connected");
                    Some(pool)
                },
                Err(e) => {
                    tracing::warn!("⚠️ Could not connect to database, continuing without it: {}", e);
                    None
                },
            },
            None => None,
        };

        Ok(Self::new_with_components(config, relay, database))
    }

    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    pub fn relay(&self) -> Option<&ChatRelay> {
        self.inner.relay.as_deref()
    }

    pub fn database(&self) -> Option<&DatabasePool> {
        self.inner.database.as_ref()
    }

    pub fn health_report(&self) -> HealthReport {
        HealthReport::new(self.inner.database.is_some(), self.inner.relay.is_some())
    }

    pub async fn shutdown(&self) {
        if let Some(database) = &self.inner.database {
            database.close().await;
        }
    }
}
