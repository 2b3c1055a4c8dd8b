//! Request DTOs
//!
//! Wire shapes for the benefit and transfer endpoints. Field validation is
//! delegated to [`BenefitDraft`] so the HTTP layer and the service agree on
//! the rules.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::money::StrictDecimal;
use crate::benefit::{BenefitDraft, BenefitId, ValidationError, Version};
use crate::transfer::TransferRequest;

fn default_active() -> bool {
    true
}

/// Create benefit request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBenefitRequest {
    /// Must be absent: ids are assigned by the store
    #[serde(default)]
    #[schema(example = json!(null))]
    pub id: Option<BenefitId>,
    #[schema(example = "Meal Voucher", min_length = 3, max_length = 100)]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Daily meal allowance", max_length = 255)]
    pub description: Option<String>,
    /// Non-negative, at most two decimal places
    #[schema(value_type = String, example = "100.00")]
    pub value: StrictDecimal,
    /// Defaults to true
    #[serde(default = "default_active")]
    pub active: bool,
}

impl CreateBenefitRequest {
    pub fn into_draft(self) -> Result<BenefitDraft, ValidationError> {
        if self.id.is_some() {
            return Err(ValidationError::IdNotAllowed);
        }
        BenefitDraft::new(
            &self.name,
            self.description.as_deref(),
            self.value.inner(),
            self.active,
        )
    }
}

/// Full update request
///
/// `version` enables the optimistic check: when present and stale the update
/// is rejected with 409.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBenefitRequest {
    #[schema(example = "Food Voucher", min_length = 3, max_length = 100)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String, example = "120.00")]
    pub value: StrictDecimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    #[schema(example = 0)]
    pub version: Option<Version>,
}

impl UpdateBenefitRequest {
    pub fn into_draft(self) -> Result<(BenefitDraft, Option<Version>), ValidationError> {
        let draft = BenefitDraft::new(
            &self.name,
            self.description.as_deref(),
            self.value.inner(),
            self.active,
        )?;
        Ok((draft, self.version))
    }
}

/// Transfer request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferApiRequest {
    #[schema(example = 1)]
    pub from_id: BenefitId,
    #[schema(example = 2)]
    pub to_id: BenefitId,
    /// Strictly positive
    #[schema(value_type = String, example = "30.00")]
    pub amount: StrictDecimal,
}

impl From<TransferApiRequest> for TransferRequest {
    fn from(req: TransferApiRequest) -> Self {
        TransferRequest::new(req.from_id, req.to_id, req.amount.inner())
    }
}

/// Search query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the name. Blank lists every record.
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_create_request_defaults_active() {
        let req: CreateBenefitRequest =
            serde_json::from_str(r#"{"name":"Meal Voucher","value":100}"#).unwrap();
        assert!(req.active);

        let draft = req.into_draft().unwrap();
        assert_eq!(draft.value(), Decimal::from(100));
        assert_eq!(draft.description(), None);
    }

    #[test]
    fn test_create_request_rejects_explicit_id() {
        let req: CreateBenefitRequest =
            serde_json::from_str(r#"{"id":7,"name":"Meal Voucher","value":"1.00"}"#).unwrap();
        assert_eq!(req.into_draft(), Err(ValidationError::IdNotAllowed));
    }

    #[test]
    fn test_update_request_carries_version() {
        let req: UpdateBenefitRequest = serde_json::from_str(
            r#"{"name":"Food card","value":"12.50","active":false,"version":3}"#,
        )
        .unwrap();
        let (draft, version) = req.into_draft().unwrap();
        assert_eq!(version, Some(3));
        assert!(!draft.active());
        assert_eq!(draft.value(), Decimal::from_str("12.50").unwrap());
    }

    #[test]
    fn test_transfer_request_camel_case() {
        let req: TransferApiRequest =
            serde_json::from_str(r#"{"fromId":1,"toId":2,"amount":"30.00"}"#).unwrap();
        let req = TransferRequest::from(req);
        assert_eq!(req.from_id, 1);
        assert_eq!(req.to_id, 2);
        assert_eq!(req.amount, Decimal::from(30));

        let snake = serde_json::from_str::<TransferApiRequest>(
            r#"{"from_id":1,"to_id":2,"amount":"30.00"}"#,
        );
        assert!(snake.is_err());
    }
}
