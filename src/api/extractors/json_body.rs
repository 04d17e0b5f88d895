//! JSON body extractor with envelope-shaped rejections.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Like [`axum::Json`], but body failures become [`AppError`]s.
///
/// A request without a JSON content type (including one with no body) yields
/// `T::default()`. An oversized body maps to 413; anything else the parser
/// rejects maps to 400 `Invalid data format` with the parser message as
/// details.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(AppJson(T::default())),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::bad_request("Invalid data format", rejection.body_text())
}
