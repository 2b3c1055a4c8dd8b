//! Data models for benefit records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::validation::{self, ValidationError};

/// Store-assigned record identifier (ascending, starts at 1)
pub type BenefitId = i64;

/// Optimistic concurrency stamp. New records start at 0.
pub type Version = i64;

/// A named entity holding a monetary value
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitRecord {
    pub id: BenefitId,
    pub name: String,
    pub description: Option<String>,
    /// Balance subject to transfer. Never negative.
    pub value: Decimal,
    /// Inactive records cannot take part in transfers
    pub active: bool,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BenefitRecord {
    /// Overwrite the editable fields with a validated draft
    pub fn apply_draft(&mut self, draft: &BenefitDraft) {
        self.name = draft.name().to_string();
        self.description = draft.description().map(str::to_string);
        self.value = draft.value();
        self.active = draft.active();
    }
}

/// Validated field set used for create and full update.
///
/// Fields are private so every draft has passed [`validation`].
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitDraft {
    name: String,
    description: Option<String>,
    value: Decimal,
    active: bool,
}

impl BenefitDraft {
    /// Validate and normalize a field set.
    ///
    /// The name is trimmed; a blank description becomes `None`.
    pub fn new(
        name: &str,
        description: Option<&str>,
        value: Decimal,
        active: bool,
    ) -> Result<Self, ValidationError> {
        let name = validation::validate_name(name)?;
        let description = validation::validate_description(description)?;
        validation::validate_value(value)?;

        Ok(Self {
            name,
            description,
            value,
            active,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record() -> BenefitRecord {
        let now = Utc::now();
        BenefitRecord {
            id: 7,
            name: "Meal Voucher".to_string(),
            description: None,
            value: d("100.00"),
            active: true,
            version: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_draft_trims_name_and_drops_blank_description() {
        let draft = BenefitDraft::new("  Health Plan  ", Some("   "), Decimal::from(10), true).unwrap();
        assert_eq!(draft.name(), "Health Plan");
        assert_eq!(draft.description(), None);
    }

    #[test]
    fn test_apply_draft_keeps_identity_and_version() {
        let mut rec = record();
        let draft = BenefitDraft::new("Transport", Some("Monthly pass"), d("55.50"), false).unwrap();

        rec.apply_draft(&draft);

        assert_eq!(rec.id, 7);
        assert_eq!(rec.version, 3);
        assert_eq!(rec.name, "Transport");
        assert_eq!(rec.description.as_deref(), Some("Monthly pass"));
        assert_eq!(rec.value, d("55.50"));
        assert!(!rec.active);
    }
}
