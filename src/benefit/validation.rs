//! Field validation for benefit records
//!
//! Enforces the data-model invariants at the write boundary:
//! - name: 3-100 characters after trimming
//! - description: optional, at most 255 characters
//! - value: non-negative, at most 2 fractional digits, at most [`VALUE_MAX`]

use rust_decimal::Decimal;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;
/// Monetary precision (cents)
pub const VALUE_MAX_SCALE: u32 = 2;
/// Largest storable balance, 9 999 999 999 999.99 (`NUMERIC(15, 2)`)
pub const VALUE_MAX: Decimal =
    Decimal::from_parts(2_764_472_319, 232_830, 0, false, VALUE_MAX_SCALE);

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for benefit fields
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid length for {field}: expected {min}-{max}, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Value cannot be negative: {0}")]
    NegativeValue(Decimal),

    #[error("Value has too many decimal places: {value} (max {max_scale})")]
    ExcessivePrecision { value: Decimal, max_scale: u32 },

    #[error("Value exceeds the maximum of {max}: {value}")]
    ValueTooLarge { value: Decimal, max: Decimal },

    #[error("New benefit must not carry an id")]
    IdNotAllowed,
}

/// Validate and trim a benefit name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    let len = name.chars().count();

    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::InvalidLength {
            field: "name",
            min: NAME_MIN_LEN,
            max: NAME_MAX_LEN,
            actual: len,
        });
    }

    Ok(name.to_string())
}

/// Validate an optional description. Blank input is treated as absent.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    let len = description.chars().count();
    if len > DESCRIPTION_MAX_LEN {
        return Err(ValidationError::InvalidLength {
            field: "description",
            min: 0,
            max: DESCRIPTION_MAX_LEN,
            actual: len,
        });
    }

    Ok(Some(description.to_string()))
}

/// Validate a stored balance
pub fn validate_value(value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeValue(value));
    }
    if value.normalize().scale() > VALUE_MAX_SCALE {
        return Err(ValidationError::ExcessivePrecision {
            value,
            max_scale: VALUE_MAX_SCALE,
        });
    }
    if value > VALUE_MAX {
        return Err(ValidationError::ValueTooLarge {
            value,
            max: VALUE_MAX,
        });
    }
    Ok(())
}
