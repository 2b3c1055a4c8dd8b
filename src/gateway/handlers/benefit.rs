//! Benefit CRUD and query handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::super::error::{ApiError, ApiResult};
use super::super::extract::ApiJson;
use super::super::state::AppState;
use super::super::types::{
    BenefitResponse, CreateBenefitRequest, ErrorResponse, SearchQuery, UpdateBenefitRequest,
};
use crate::benefit::{BenefitId, BenefitRecord};

/// Path ids arrive as strings so a bad id gets the standard error body
fn parse_id(raw: &str) -> ApiResult<BenefitId> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid benefit id: {}", raw)))
}

fn to_responses(records: Vec<BenefitRecord>) -> Json<Vec<BenefitResponse>> {
    Json(records.into_iter().map(BenefitResponse::from).collect())
}

/// List all benefits
///
/// GET /api/benefits
#[utoipa::path(
    get,
    path = "/api/benefits",
    responses(
        (status = 200, description = "All records ordered by id", body = Vec<BenefitResponse>)
    ),
    tag = "Benefits"
)]
pub async fn list_benefits(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BenefitResponse>>> {
    Ok(to_responses(state.benefits.list_all().await?))
}

/// List active benefits
///
/// GET /api/benefits/active
#[utoipa::path(
    get,
    path = "/api/benefits/active",
    responses(
        (status = 200, description = "Active records ordered by id", body = Vec<BenefitResponse>)
    ),
    tag = "Benefits"
)]
pub async fn list_active_benefits(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BenefitResponse>>> {
    Ok(to_responses(state.benefits.list_active().await?))
}

/// Get a benefit by id
///
/// GET /api/benefits/{id}
#[utoipa::path(
    get,
    path = "/api/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    responses(
        (status = 200, description = "Record found", body = BenefitResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse)
    ),
    tag = "Benefits"
)]
pub async fn get_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<BenefitResponse>> {
    let id = parse_id(&id)?;
    Ok(Json(state.benefits.get(id).await?.into()))
}

/// Search benefits by name
///
/// GET /api/benefits/search?name=...
///
/// A missing or blank term lists every record.
#[utoipa::path(
    get,
    path = "/api/benefits/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching records ordered by id", body = Vec<BenefitResponse>)
    ),
    tag = "Benefits"
)]
pub async fn search_benefits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<BenefitResponse>>> {
    let records = match query.name.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => state.benefits.search_by_name(term).await?,
        _ => state.benefits.list_all().await?,
    };
    Ok(to_responses(records))
}

/// Create a benefit
///
/// POST /api/benefits
#[utoipa::path(
    post,
    path = "/api/benefits",
    request_body = CreateBenefitRequest,
    responses(
        (status = 201, description = "Created with version 0", body = BenefitResponse),
        (status = 400, description = "Field constraint violated or id supplied", body = ErrorResponse)
    ),
    tag = "Benefits"
)]
pub async fn create_benefit(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBenefitRequest>,
) -> ApiResult<(StatusCode, Json<BenefitResponse>)> {
    let draft = req.into_draft()?;
    let record = state.benefits.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Replace a benefit's fields
///
/// PUT /api/benefits/{id}
#[utoipa::path(
    put,
    path = "/api/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    request_body = UpdateBenefitRequest,
    responses(
        (status = 200, description = "Updated, version incremented", body = BenefitResponse),
        (status = 400, description = "Field constraint violated", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse),
        (status = 409, description = "Stale version", body = ErrorResponse)
    ),
    tag = "Benefits"
)]
pub async fn update_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateBenefitRequest>,
) -> ApiResult<Json<BenefitResponse>> {
    let id = parse_id(&id)?;
    let (draft, version) = req.into_draft()?;
    let record = state.benefits.update(id, draft, version).await?;
    Ok(Json(record.into()))
}

/// Deactivate a benefit (soft delete)
///
/// PATCH /api/benefits/{id}/deactivate
#[utoipa::path(
    patch,
    path = "/api/benefits/{id}/deactivate",
    params(("id" = i64, Path, description = "Benefit id")),
    responses(
        (status = 204, description = "Deactivated"),
        (status = 404, description = "No record with this id", body = ErrorResponse)
    ),
    tag = "Benefits"
)]
pub async fn deactivate_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.benefits.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a benefit permanently
///
/// DELETE /api/benefits/{id}
#[utoipa::path(
    delete,
    path = "/api/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No record with this id", body = ErrorResponse)
    ),
    tag = "Benefits"
)]
pub async fn delete_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.benefits.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
