//! API index.

use axum::{routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::route_not_found;
use crate::api::AppState;
use crate::config::API_VERSION;
use crate::types::ApiResponse;

/// Index payload
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexData {
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// Entry points advertised by the index.
#[derive(Debug, Serialize, ToSchema)]
pub struct Endpoints {
    pub health: &'static str,
    pub users: &'static str,
    pub documentation: &'static str,
}

/// Create index routes.
pub fn index_routes() -> Router<AppState> {
    Router::new().route("/", get(index).fallback(route_not_found))
}

/// Describe the API
#[utoipa::path(
    get,
    path = "/",
    tag = "Index",
    responses(
        (status = 200, description = "API index", body = IndexData)
    )
)]
pub async fn index() -> ApiResponse<IndexData> {
    ApiResponse::with_message(
        IndexData {
            version: API_VERSION,
            endpoints: Endpoints {
                health: "/health",
                users: "/users",
                documentation: "/swagger-ui",
            },
        },
        "Welcome to the API",
    )
}
