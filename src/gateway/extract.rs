//! JSON body extractor
//!
//! Same as `axum::Json`, but a malformed body is reported in the
//! [`ErrorResponse`](super::types::ErrorResponse) shape instead of axum's
//! plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_MEDIA_TYPE",
                    e.body_text(),
                ),
                _ => ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())),
            })?;

        Ok(ApiJson(value))
    }
}
