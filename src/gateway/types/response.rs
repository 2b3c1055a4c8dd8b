//! API Response types
//!
//! - `BenefitResponse`: record as returned by every benefit endpoint
//! - `ErrorResponse`: the single error body shape

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::money::format_value;
use crate::benefit::{BenefitId, BenefitRecord, Version};

/// Benefit record response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BenefitResponse {
    #[schema(example = 1)]
    pub id: BenefitId,
    #[schema(example = "Meal Voucher")]
    pub name: String,
    pub description: Option<String>,
    /// Decimal string with two places
    #[schema(example = "100.00")]
    pub value: String,
    pub active: bool,
    #[schema(example = 0)]
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BenefitRecord> for BenefitResponse {
    fn from(r: BenefitRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            value: format_value(r.value),
            active: r.active,
            version: r.version,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 422)]
    pub status: u16,
    #[schema(example = "Insufficient balance on benefit 1: available 10.00, requested 20.00")]
    pub message: String,
    /// RFC 3339
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
