//! Request logging.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::Span;

/// Resolve the client address for logging.
///
/// With `trust_proxy`, `X-Forwarded-For` (first hop) then `X-Real-IP` win
/// over the socket address.
pub fn client_ip<B>(request: &Request<B>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        if let Some(real_ip) = request
            .headers()
            .get("X-Real-IP")
            .and_then(|h| h.to_str().ok())
        {
            return real_ip.trim().to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// HTTP trace layer whose span carries method, URI and client address.
pub fn trace_layer(
    trust_proxy: bool,
) -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone,
> {
    TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            client = %client_ip(request, trust_proxy),
        )
    })
}
