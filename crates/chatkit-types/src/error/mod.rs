//! Typed error definitions.
//!
//! - [`RelayError`] is what a chat request can fail with at the HTTP boundary.
//! - [`ConfigError`] covers loading and validating [`crate::RelayConfig`].

mod config;
mod relay;

pub use config::ConfigError;
pub use relay::{RelayError, MISSING_FIELDS_MESSAGE};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = RelayError::Provider {
            message: "boom".to_string(),
            attempted: vec!["session_scoped".to_string()],
        };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Provider"));
        assert!(json.contains("session_scoped"));

        let deserialized: RelayError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ValidationError {
            field: "port".to_string(),
            message: "out of range".to_string(),
        };

        let msg = format!("{}", err);
        assert!(msg.contains("port"));
        assert!(msg.contains("out of range"));
    }
}
