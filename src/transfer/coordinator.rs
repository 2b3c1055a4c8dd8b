//! Transfer Coordinator
//!
//! Drives a transfer through debit, credit and (if needed) compensation using
//! only single-id conditional writes. See the module docs for the flow.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::error::TransferError;
use super::types::{TransferPhase, TransferReceipt, TransferRequest};
use super::validation::validate_transfer;
use crate::benefit::{BenefitId, BenefitRecord};
use crate::config::TransferConfig;
use crate::store::{BenefitStore, StoreError};

/// Transfer Coordinator - bounded optimistic retry over a `BenefitStore`
pub struct TransferCoordinator {
    store: Arc<dyn BenefitStore>,
    config: TransferConfig,
}

impl TransferCoordinator {
    /// Create a new TransferCoordinator
    pub fn new(store: Arc<dyn BenefitStore>, config: TransferConfig) -> Self {
        Self { store, config }
    }

    fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    fn compensation_attempts(&self) -> u32 {
        self.config.compensation_attempts.max(1)
    }

    /// Move `req.amount` from `req.from_id` to `req.to_id`.
    ///
    /// On `Ok` both records carry their new value and a version bumped by
    /// exactly one. On `Err` every record is back at its pre-transfer value,
    /// except for `CompensationFailed`.
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferReceipt, TransferError> {
        let max_attempts = self.max_attempts();
        let amount = req.amount;

        for attempt in 1..=max_attempts {
            // 1. Snapshot both endpoints
            let from = self.snapshot(req.from_id).await?;
            let to = self.snapshot(req.to_id).await?;

            // 2. Validate against the snapshot. Rejections never write.
            validate_transfer(&req, from.as_ref(), to.as_ref())?;
            let (Some(from), Some(to)) = (from, to) else {
                return Err(TransferError::InactiveOrMissingEndpoint(req.from_id));
            };

            debug!(
                from_id = req.from_id,
                to_id = req.to_id,
                amount = %amount,
                attempt,
                from_version = from.version,
                to_version = to.version,
                "Transfer snapshot validated"
            );

            // 3. Debit against the observed source version
            let debit = self
                .store
                .conditional_update(req.from_id, from.version, &|r: &mut BenefitRecord| {
                    withdraw(r, amount)
                })
                .await;

            match debit {
                Ok(debited) => {
                    // 4. Funds are in flight from here on
                    let mut receipt = self.credit(&req, debited, to).await?;
                    receipt.attempts = attempt;
                    info!(
                        from_id = req.from_id,
                        to_id = req.to_id,
                        amount = %amount,
                        attempts = attempt,
                        "Transfer committed"
                    );
                    return Ok(receipt);
                }
                // Source changed or vanished since the snapshot: re-read and re-validate
                Err(StoreError::VersionConflict { actual, .. }) => {
                    warn!(
                        from_id = req.from_id,
                        attempt,
                        expected = from.version,
                        actual,
                        "Debit conflict, re-snapshotting"
                    );
                }
                Err(StoreError::NotFound(_)) | Err(StoreError::NegativeValue(_)) => {
                    debug!(from_id = req.from_id, attempt, "Source moved under debit, re-validating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        // The last attempt may have found the source gone or drained
        let from = self.snapshot(req.from_id).await?;
        let to = self.snapshot(req.to_id).await?;
        validate_transfer(&req, from.as_ref(), to.as_ref())?;

        warn!(
            from_id = req.from_id,
            to_id = req.to_id,
            attempts = max_attempts,
            "Debit retries exhausted"
        );
        Err(TransferError::ConcurrencyExhausted {
            phase: TransferPhase::Debit,
            attempts: max_attempts,
        })
    }

    /// Credit the destination after a successful debit.
    ///
    /// Only the credit is retried. Any terminal failure here is routed through
    /// [`Self::compensate`] before it is reported.
    async fn credit(
        &self,
        req: &TransferRequest,
        debited: BenefitRecord,
        mut to: BenefitRecord,
    ) -> Result<TransferReceipt, TransferError> {
        let max_attempts = self.max_attempts();
        let amount = req.amount;

        for attempt in 1..=max_attempts {
            let credit = self
                .store
                .conditional_update(to.id, to.version, &|r: &mut BenefitRecord| {
                    deposit(r, amount)
                })
                .await;

            match credit {
                Ok(credited) => {
                    return Ok(TransferReceipt {
                        from: debited,
                        to: credited,
                        attempts: 1,
                    });
                }
                Err(StoreError::VersionConflict { actual, .. }) => {
                    warn!(to_id = to.id, attempt, expected = to.version, actual, "Credit conflict, re-reading destination");
                    match self.snapshot(to.id).await {
                        Ok(Some(fresh)) if fresh.active => to = fresh,
                        Ok(_) => {
                            // Deleted or deactivated while value was in flight
                            return Err(self
                                .compensate(req, TransferError::DestinationVanished(to.id))
                                .await);
                        }
                        Err(e) => return Err(self.compensate(req, e).await),
                    }
                }
                Err(StoreError::NotFound(id)) => {
                    warn!(to_id = id, "Destination deleted mid-transfer");
                    return Err(self
                        .compensate(req, TransferError::DestinationVanished(id))
                        .await);
                }
                Err(e) => return Err(self.compensate(req, e.into()).await),
            }
        }

        warn!(to_id = to.id, attempts = max_attempts, "Credit retries exhausted");
        Err(self
            .compensate(
                req,
                TransferError::ConcurrencyExhausted {
                    phase: TransferPhase::Credit,
                    attempts: max_attempts,
                },
            )
            .await)
    }

    /// Refund the source after a failed credit.
    ///
    /// Returns `cause` when the refund lands, `CompensationFailed` otherwise.
    /// The refund ignores `active`: value goes back even to a deactivated source.
    async fn compensate(&self, req: &TransferRequest, cause: TransferError) -> TransferError {
        let amount = req.amount;
        let attempts = self.compensation_attempts();
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            let current = match self.store.get(req.from_id).await {
                Ok(current) => current,
                Err(StoreError::NotFound(_)) => {
                    return self.compensation_failed(req, "source no longer exists".to_string());
                }
                Err(e) => {
                    warn!(from_id = req.from_id, attempt, error = %e, "Refund read failed, retrying");
                    last_error = e.to_string();
                    continue;
                }
            };

            let refund = self
                .store
                .conditional_update(req.from_id, current.version, &|r: &mut BenefitRecord| {
                    deposit(r, amount)
                })
                .await;

            match refund {
                Ok(_) => {
                    warn!(
                        from_id = req.from_id,
                        to_id = req.to_id,
                        amount = %amount,
                        cause = %cause,
                        "Transfer compensated, source refunded"
                    );
                    return cause;
                }
                Err(StoreError::NotFound(_)) => {
                    return self.compensation_failed(req, "source no longer exists".to_string());
                }
                Err(e) => {
                    debug!(from_id = req.from_id, attempt, error = %e, "Refund attempt failed");
                    last_error = e.to_string();
                }
            }
        }

        self.compensation_failed(
            req,
            format!("{} attempts exhausted ({})", attempts, last_error),
        )
    }

    fn compensation_failed(&self, req: &TransferRequest, reason: String) -> TransferError {
        error!(
            from_id = req.from_id,
            to_id = req.to_id,
            amount = %req.amount,
            phase = %TransferPhase::Compensate,
            reason = %reason,
            "COMPENSATION FAILED: source debited without credit, manual reconciliation required"
        );
        TransferError::CompensationFailed {
            from_id: req.from_id,
            amount: req.amount,
            reason,
        }
    }

    /// Read a record, mapping NotFound to `None` for validation
    async fn snapshot(&self, id: BenefitId) -> Result<Option<BenefitRecord>, TransferError> {
        match self.store.get(id).await {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Sum of all balances (test and audit helper)
    pub async fn total_value(&self) -> Result<Decimal, TransferError> {
        let records = self.store.list().await?;
        Ok(records.iter().map(|r| r.value).sum())
    }
}

fn withdraw(record: &mut BenefitRecord, amount: Decimal) -> Result<(), StoreError> {
    record.value = record
        .value
        .checked_sub(amount)
        .ok_or(StoreError::ValueOverflow(record.id))?;
    Ok(())
}

fn deposit(record: &mut BenefitRecord, amount: Decimal) -> Result<(), StoreError> {
    record.value = record
        .value
        .checked_add(amount)
        .ok_or(StoreError::ValueOverflow(record.id))?;
    Ok(())
}
