//! Classification of non-success provider answers.
//!
//! OpenAI error bodies look like
//! `{"error": {"message": "...", "type": "...", "param": "...", "code": "..."}}`.
//! The raw body never leaves this module untruncated.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use super::ProviderCallError;

/// Upper bound for provider messages kept in errors, logs and metadata.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 512;

const UNSUPPORTED_CODES: &[&str] =
    &["unsupported_operation", "operation_not_supported", "unknown_url", "invalid_url"];

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[allow(clippy::expect_used, reason = "static pattern")]
fn unknown_param_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:unknown parameter|unrecognized request arguments? supplied)\s*:?\s*'?([A-Za-z0-9_.\[\]]+)'?",
        )
        .expect("valid unknown-parameter regex")
    })
}

/// Truncate on a char boundary, marking the cut.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let mut out: String = message.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Extract the parameter name from an "unknown parameter" message.
pub fn parse_unknown_parameter(message: &str) -> Option<String> {
    unknown_param_regex()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

/// Map a non-2xx answer for `operation` to a [`ProviderCallError`].
///
/// - 405 / 501, or an unsupported-operation code → `Unsupported`
/// - 404 only when the route itself is unknown ("Invalid URL", non-JSON body);
///   a 404 for a missing resource stays a rejection
/// - 400 naming an unknown parameter → `UnknownParameter`
/// - everything else → `Rejected`
pub fn classify_error(operation: &str, status: u16, body: &str) -> ProviderCallError {
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
    let detail = envelope.and_then(|e| e.error);
    let parsed = detail.is_some();
    let detail = detail.unwrap_or_default();

    let message = detail
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    let code = detail.code.as_deref().unwrap_or_default();

    let unsupported_code = UNSUPPORTED_CODES.contains(&code);
    let unknown_route = status == 404 && (!parsed || message.starts_with("Invalid URL"));

    if unsupported_code || unknown_route || status == 405 || status == 501 {
        return ProviderCallError::unsupported(operation);
    }

    if status == 400 {
        let param = if code == "unknown_parameter" {
            detail.param.clone().or_else(|| parse_unknown_parameter(&message))
        } else {
            parse_unknown_parameter(&message)
        };
        if let Some(param) = param {
            return ProviderCallError::unknown_parameter(
                param,
                truncate_message(&message, MAX_ERROR_MESSAGE_CHARS),
            );
        }
    }

    let message = if message.is_empty() { format!("HTTP {}", status) } else { message };
    ProviderCallError::Rejected {
        status,
        message: truncate_message(&message, MAX_ERROR_MESSAGE_CHARS),
    }
}
