//! Transfer Error Types

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::TransferPhase;
use crate::benefit::BenefitId;
use crate::store::StoreError;

/// Transfer error types
///
/// The first four are validation rejections: no write was attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Source and destination cannot be the same")]
    SameEndpoint,

    #[error("Transfer amount must be positive, in whole cents and at most 9999999999999.99")]
    InvalidAmount,

    #[error("Benefit {0} does not exist or is not active")]
    InactiveOrMissingEndpoint(BenefitId),

    #[error("Insufficient balance on benefit {id}: available {available}, requested {requested}")]
    InsufficientBalance {
        id: BenefitId,
        available: Decimal,
        requested: Decimal,
    },

    // === Concurrency Errors ===
    #[error("Transfer gave up after {attempts} conflicting attempts ({phase}), please retry")]
    ConcurrencyExhausted { phase: TransferPhase, attempts: u32 },

    #[error("Destination {0} disappeared mid-transfer; the source was refunded")]
    DestinationVanished(BenefitId),

    /// Credit would push the destination past the storable maximum; the source was refunded
    #[error("Benefit {0} cannot hold the transferred amount")]
    ValueOverflow(BenefitId),

    /// Source debited but could not be refunded. Needs manual reconciliation.
    #[error("Refund of {amount} to benefit {from_id} failed: {reason}")]
    CompensationFailed {
        from_id: BenefitId,
        amount: Decimal,
        reason: String,
    },

    // === System Errors ===
    #[error("Store error: {0}")]
    Store(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::SameEndpoint => "SAME_ENDPOINT",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::InactiveOrMissingEndpoint(_) => "INACTIVE_OR_MISSING_ENDPOINT",
            TransferError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            TransferError::ConcurrencyExhausted { .. } => "CONCURRENCY_EXHAUSTED",
            TransferError::DestinationVanished(_) => "DESTINATION_VANISHED",
            TransferError::ValueOverflow(_) => "VALUE_OVERFLOW",
            TransferError::CompensationFailed { .. } => "COMPENSATION_FAILED",
            TransferError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::SameEndpoint | TransferError::InvalidAmount => 400,
            TransferError::InactiveOrMissingEndpoint(_)
            | TransferError::InsufficientBalance { .. }
            | TransferError::ValueOverflow(_) => 422,
            TransferError::ConcurrencyExhausted { .. } | TransferError::DestinationVanished(_) => {
                409
            }
            TransferError::CompensationFailed { .. } | TransferError::Store(_) => 500,
        }
    }

    /// Rejected before any write
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TransferError::SameEndpoint
                | TransferError::InvalidAmount
                | TransferError::InactiveOrMissingEndpoint(_)
                | TransferError::InsufficientBalance { .. }
        )
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ValueOverflow(id) => TransferError::ValueOverflow(id),
            e => TransferError::Store(e.to_string()),
        }
    }
}
