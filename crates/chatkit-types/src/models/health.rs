//! Health endpoint report.

use serde::{Deserialize, Serialize};

/// Whether a database pool was configured at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Available,
    NotConfigured,
}

/// Whether a provider client was configured at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Configured,
    NotConfigured,
}

/// Presence of optional collaborators. No live connectivity check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub ok: bool,
    pub database: DatabaseStatus,
    pub openai: ProviderStatus,
}

impl HealthReport {
    pub fn new(database_configured: bool, provider_configured: bool) -> Self {
        Self {
            ok: true,
            database: if database_configured {
                DatabaseStatus::Available
            } else {
                DatabaseStatus::NotConfigured
            },
            openai: if provider_configured {
                ProviderStatus::Configured
            } else {
                ProviderStatus::NotConfigured
            },
        }
    }
}
