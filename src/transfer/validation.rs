//! Transfer validation
//!
//! Pure checks against a snapshot supplied by the caller. Never reads the store.

use rust_decimal::Decimal;

use super::error::TransferError;
use super::types::TransferRequest;
use crate::benefit::BenefitRecord;
use crate::benefit::validation::{VALUE_MAX, VALUE_MAX_SCALE};

/// Check a transfer against snapshots of both endpoints.
///
/// `None` means the record did not exist at snapshot time. Rules run in
/// order and the first failure wins:
/// 1. distinct endpoints
/// 2. positive amount in whole cents, no larger than the storable maximum
/// 3. both endpoints exist and are active (source checked first)
/// 4. source balance covers the amount
pub fn validate_transfer(
    req: &TransferRequest,
    from: Option<&BenefitRecord>,
    to: Option<&BenefitRecord>,
) -> Result<(), TransferError> {
    if req.from_id == req.to_id {
        return Err(TransferError::SameEndpoint);
    }

    // Sub-cent amounts would leave balances the store cannot hold exactly
    if req.amount <= Decimal::ZERO
        || req.amount.normalize().scale() > VALUE_MAX_SCALE
        || req.amount > VALUE_MAX
    {
        return Err(TransferError::InvalidAmount);
    }

    let from = from
        .filter(|r| r.active)
        .ok_or(TransferError::InactiveOrMissingEndpoint(req.from_id))?;
    to.filter(|r| r.active)
        .ok_or(TransferError::InactiveOrMissingEndpoint(req.to_id))?;

    if from.value < req.amount {
        return Err(TransferError::InsufficientBalance {
            id: from.id,
            available: from.value,
            requested: req.amount,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: i64, value: &str, active: bool) -> BenefitRecord {
        let now = Utc::now();
        BenefitRecord {
            id,
            name: format!("Benefit {id}"),
            description: None,
            value: d(value),
            active,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_valid_transfer() {
        let a = record(1, "100.00", true);
        let b = record(2, "50.00", true);
        let req = TransferRequest::new(1, 2, d("30.00"));
        assert_eq!(validate_transfer(&req, Some(&a), Some(&b)), Ok(()));
    }

    #[test]
    fn test_exact_balance_is_allowed() {
        let a = record(1, "30.00", true);
        let b = record(2, "0", true);
        let req = TransferRequest::new(1, 2, d("30"));
        assert!(validate_transfer(&req, Some(&a), Some(&b)).is_ok());
    }

    #[test]
    fn test_same_endpoint_wins_over_everything() {
        // Missing records, zero amount: same endpoint is still reported first
        let req = TransferRequest::new(1, 1, Decimal::ZERO);
        assert_eq!(
            validate_transfer(&req, None, None),
            Err(TransferError::SameEndpoint)
        );

        let a = record(1, "100.00", true);
        let req = TransferRequest::new(1, 1, d("5.00"));
        assert_eq!(
            validate_transfer(&req, Some(&a), Some(&a)),
            Err(TransferError::SameEndpoint)
        );
    }

    #[test]
    fn test_non_positive_amount() {
        let a = record(1, "100.00", true);
        let b = record(2, "50.00", true);
        for amount in ["0", "0.00", "-0.01", "-100"] {
            let req = TransferRequest::new(1, 2, d(amount));
            assert_eq!(
                validate_transfer(&req, Some(&a), Some(&b)),
                Err(TransferError::InvalidAmount),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn test_sub_cent_amount_is_rejected() {
        let a = record(1, "100.00", true);
        let b = record(2, "50.00", true);
        for amount in ["0.005", "0.001", "10.999"] {
            let req = TransferRequest::new(1, 2, d(amount));
            assert_eq!(
                validate_transfer(&req, Some(&a), Some(&b)),
                Err(TransferError::InvalidAmount),
                "amount {amount}"
            );
        }

        // Trailing zeros are not extra precision
        let req = TransferRequest::new(1, 2, d("0.0100"));
        assert!(validate_transfer(&req, Some(&a), Some(&b)).is_ok());
    }

    #[test]
    fn test_amount_above_storable_maximum_is_rejected() {
        let a = record(1, "9999999999999.99", true);
        let b = record(2, "0", true);

        let req = TransferRequest::new(1, 2, VALUE_MAX);
        assert!(validate_transfer(&req, Some(&a), Some(&b)).is_ok());

        for amount in [d("10000000000000"), Decimal::MAX] {
            let req = TransferRequest::new(1, 2, amount);
            assert_eq!(
                validate_transfer(&req, Some(&a), Some(&b)),
                Err(TransferError::InvalidAmount)
            );
        }
    }

    #[test]
    fn test_amount_checked_before_existence() {
        let req = TransferRequest::new(1, 2, d("-1"));
        assert_eq!(
            validate_transfer(&req, None, None),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn test_inactive_or_missing_endpoints() {
        let active = record(1, "100.00", true);
        let inactive = record(2, "50.00", false);
        let req = TransferRequest::new(1, 2, d("10.00"));

        assert_eq!(
            validate_transfer(&req, Some(&active), Some(&inactive)),
            Err(TransferError::InactiveOrMissingEndpoint(2))
        );
        assert_eq!(
            validate_transfer(&req, Some(&active), None),
            Err(TransferError::InactiveOrMissingEndpoint(2))
        );
        assert_eq!(
            validate_transfer(&req, None, None),
            Err(TransferError::InactiveOrMissingEndpoint(1))
        );
    }

    #[test]
    fn test_inactive_checked_before_balance() {
        let poor_inactive = record(1, "1.00", false);
        let b = record(2, "50.00", true);
        let req = TransferRequest::new(1, 2, d("10.00"));
        assert_eq!(
            validate_transfer(&req, Some(&poor_inactive), Some(&b)),
            Err(TransferError::InactiveOrMissingEndpoint(1))
        );
    }

    #[test]
    fn test_insufficient_balance() {
        let a = record(1, "10.00", true);
        let b = record(2, "50.00", true);
        let req = TransferRequest::new(1, 2, d("20.00"));
        assert_eq!(
            validate_transfer(&req, Some(&a), Some(&b)),
            Err(TransferError::InsufficientBalance {
                id: 1,
                available: d("10.00"),
                requested: d("20.00"),
            })
        );
    }
}
