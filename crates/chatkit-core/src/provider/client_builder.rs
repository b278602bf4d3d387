use std::time::Duration;

use crate::error::AppResult;

/// Build HTTP client with optional upstream proxy and timeout.
pub fn build_http_client(upstream_proxy: Option<&str>, timeout_secs: u64) -> AppResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(timeout_secs.max(5)))
        .tcp_nodelay(true);

    if let Some(url) = upstream_proxy.map(str::trim).filter(|u| !u.is_empty()) {
        tracing::info!("Routing provider calls through upstream proxy");
        builder = builder.proxy(reqwest::Proxy::all(url)?);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_proxy() {
        assert!(build_http_client(None, 300).is_ok());
        assert!(build_http_client(Some("  "), 300).is_ok());
    }

    #[test]
    fn test_build_with_proxy() {
        assert!(build_http_client(Some("http://proxy.example.com:8080"), 60).is_ok());
    }

    #[test]
    fn test_build_rejects_bad_proxy() {
        let err = build_http_client(Some("http://exa mple.com:8080"), 60).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Network(_)));
    }
}
