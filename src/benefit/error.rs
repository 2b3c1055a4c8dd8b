//! Benefit service errors

use thiserror::Error;

use super::models::{BenefitId, Version};
use super::validation::ValidationError;
use crate::store::StoreError;

/// Errors returned by [`super::BenefitService`]
#[derive(Error, Debug)]
pub enum BenefitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Benefit not found with id: {0}")]
    NotFound(BenefitId),

    #[error("Benefit {id} was modified concurrently: expected version {expected}, found {actual}")]
    StaleVersion {
        id: BenefitId,
        expected: Version,
        actual: Version,
    },

    #[error("Benefit {0} would exceed the maximum storable value")]
    ValueOverflow(BenefitId),

    /// Unconditional edits kept losing the version race
    #[error("Benefit {0} is busy, please retry")]
    Busy(BenefitId),

    #[error("Store error: {0}")]
    Store(String),
}

impl BenefitError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            BenefitError::Validation(_) => "VALIDATION_ERROR",
            BenefitError::NotFound(_) => "NOT_FOUND",
            BenefitError::StaleVersion { .. } => "VERSION_CONFLICT",
            BenefitError::ValueOverflow(_) => "VALUE_OVERFLOW",
            BenefitError::Busy(_) => "CONCURRENCY_EXHAUSTED",
            BenefitError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            BenefitError::Validation(_) | BenefitError::ValueOverflow(_) => 400,
            BenefitError::NotFound(_) => 404,
            BenefitError::StaleVersion { .. } | BenefitError::Busy(_) => 409,
            BenefitError::Store(_) => 500,
        }
    }
}

impl From<StoreError> for BenefitError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => BenefitError::NotFound(id),
            StoreError::VersionConflict {
                id,
                expected,
                actual,
            } => BenefitError::StaleVersion {
                id,
                expected,
                actual,
            },
            StoreError::NegativeValue(value) => {
                BenefitError::Validation(ValidationError::NegativeValue(value))
            }
            StoreError::ValueOverflow(id) => BenefitError::ValueOverflow(id),
            StoreError::Infrastructure(msg) => BenefitError::Store(msg),
        }
    }
}
