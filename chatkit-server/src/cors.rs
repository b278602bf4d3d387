// CORS middleware
use axum::http::{HeaderValue, Method};
use chatkit_types::RelayConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// `*` (or no list) allows any origin; otherwise only the listed ones.
pub fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> =
            config.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}
