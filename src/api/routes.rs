//! Application route configuration.

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health_routes, index_routes, user_routes};
use super::middleware::{cors_layer, panic_response, route_not_found, trace_layer};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_PREFIX;

/// Create the application router with all routes configured.
///
/// Every API route is reachable both at the root and under `/api`.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .nest(API_PREFIX, api_routes())
        .merge(api_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        // Global middleware, innermost first
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(&config.cors_origin))
        .layer(trace_layer(config.trust_proxy))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(index_routes())
        .nest("/health", health_routes())
        .nest("/users", user_routes())
}
