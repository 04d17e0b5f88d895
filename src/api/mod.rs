//! API layer - HTTP handlers and middleware
//!
//! - Request handlers for users, health and the index
//! - Middleware (CORS, request logging, fallbacks)
//! - JSON body extractor
//! - Route definitions, mounted at the root and under `/api`

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
