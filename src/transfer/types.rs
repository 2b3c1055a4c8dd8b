//! Transfer Core Types

use std::fmt;

use rust_decimal::Decimal;

use crate::benefit::{BenefitId, BenefitRecord};

/// Transfer command. Validated and discarded, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRequest {
    pub from_id: BenefitId,
    pub to_id: BenefitId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(from_id: BenefitId, to_id: BenefitId, amount: Decimal) -> Self {
        Self {
            from_id,
            to_id,
            amount,
        }
    }
}

/// Both records as written by a committed transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Source after the debit
    pub from: BenefitRecord,
    /// Destination after the credit
    pub to: BenefitRecord,
    /// Debit attempts used (1 = no conflict)
    pub attempts: u32,
}

/// Which write of the transfer a retry loop was driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Debit,
    Credit,
    Compensate,
}

impl TransferPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferPhase::Debit => "DEBIT",
            TransferPhase::Credit => "CREDIT",
            TransferPhase::Compensate => "COMPENSATE",
        }
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
