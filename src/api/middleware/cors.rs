//! CORS policy built from the configured origin(s).

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CORS_ANY_ORIGIN;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer.
///
/// `*` allows any origin without credentials. Otherwise `origin` is a
/// comma-separated allow-list and credentials are allowed; entries that are
/// not valid header values are skipped.
pub fn cors_layer(origin: &str) -> CorsLayer {
    if origin.trim() == CORS_ANY_ORIGIN {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origin
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = s, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
