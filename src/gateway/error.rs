//! API error type
//!
//! Every handler returns [`ApiResult`]. Domain errors convert into
//! [`ApiError`] through their `http_status()`, so the status mapping lives
//! next to each error enum.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::types::ErrorResponse;
use crate::benefit::{BenefitError, ValidationError};
use crate::transfer::TransferError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Machine-readable code, logged but not part of the body
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", message)
    }

    fn from_status(status: u16, code: &'static str, message: String) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), code = self.code, message = %self.message, "Request failed");
        } else {
            warn!(status = self.status.as_u16(), code = self.code, message = %self.message, "Request rejected");
        }

        let body = Json(ErrorResponse::new(self.status.as_u16(), self.message));
        (self.status, body).into_response()
    }
}

impl From<BenefitError> for ApiError {
    fn from(e: BenefitError) -> Self {
        Self::from_status(e.http_status(), e.code(), e.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        BenefitError::from(e).into()
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        Self::from_status(e.http_status(), e.code(), e.to_string())
    }
}
