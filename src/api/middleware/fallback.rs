//! Catch-all responses: unmatched routes and handler panics.

use std::any::Any;

use axum::{
    extract::OriginalUri,
    http::Method,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// Router fallback: 404 envelope naming the method and full request path.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// `CatchPanicLayer` handler: a panic becomes the 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    AppError::internal(message).into_response()
}
