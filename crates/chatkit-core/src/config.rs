use std::fs;
use std::path::Path;

use chatkit_types::{ConfigError, RelayConfig};
use validator::Validate;

/// Load relay configuration.
///
/// Without a path the defaults are returned; CLI/env overrides are applied by
/// the caller afterwards and the merged result goes through [`validate_config`].
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(RelayConfig::default());
    };

    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&e))?;
    let config: RelayConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

    tracing::debug!("Loaded config file {}", path.display());
    Ok(config)
}

pub fn validate_config(config: &RelayConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|e| ConfigError::from_validation_errors(&e))
}
