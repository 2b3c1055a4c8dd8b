//! Transfer handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};

use super::super::error::ApiResult;
use super::super::extract::ApiJson;
use super::super::state::AppState;
use super::super::types::{ErrorResponse, TransferApiRequest};

/// Transfer value between two benefits
///
/// POST /api/benefits/transfer
#[utoipa::path(
    post,
    path = "/api/benefits/transfer",
    request_body = TransferApiRequest,
    responses(
        (status = 204, description = "Transfer committed"),
        (status = 400, description = "Same endpoint, amount not positive or not in whole cents, or malformed body", body = ErrorResponse),
        (status = 409, description = "Concurrency exhausted or destination vanished (source refunded)", body = ErrorResponse),
        (status = 422, description = "Inactive or missing endpoint, insufficient balance, or destination would exceed the maximum value", body = ErrorResponse),
        (status = 500, description = "Compensation failed", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TransferApiRequest>,
) -> ApiResult<StatusCode> {
    state.transfers.transfer(req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}
