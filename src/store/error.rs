//! Entity store errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::benefit::{BenefitId, Version};

/// Store-level failures.
///
/// `NotFound` and `VersionConflict` are expected outcomes of a conditional
/// write; `Infrastructure` covers everything the backend itself failed at.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Benefit not found: {0}")]
    NotFound(BenefitId),

    #[error("Version conflict on benefit {id}: expected {expected}, found {actual}")]
    VersionConflict {
        id: BenefitId,
        expected: Version,
        actual: Version,
    },

    /// A mutator tried to drive a balance below zero; nothing was written
    #[error("Mutation would leave a negative value: {0}")]
    NegativeValue(Decimal),

    /// A mutator would push a balance past the storable maximum; nothing was written
    #[error("Mutation would overflow the value of benefit {0}")]
    ValueOverflow(BenefitId),

    #[error("Store unavailable: {0}")]
    Infrastructure(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Infrastructure(e.to_string())
    }
}
