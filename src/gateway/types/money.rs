//! Money types for API boundary enforcement
//!
//! - `StrictDecimal`: Format-validated input type
//! - `format_value`: Output formatting for record values

use std::fmt;

use rust_decimal::prelude::*;
use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};

// ============================================================================
// StrictDecimal: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format Decimal - validates format during deserialization
///
/// Accepts JSON strings and JSON numbers. String input is checked:
/// - Rejects `.5` (must be `0.5`)
/// - Rejects `5.` (must be `5.0` or `5`)
/// - Rejects empty strings
/// - Rejects scientific notation
/// - Rejects a `+` prefix
///
/// Sign and precision are business rules and are checked later, so that a
/// negative value reports the domain error instead of a parse error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrictDecimal(Decimal);

impl StrictDecimal {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }

    /// Create from Decimal (for testing)
    #[cfg(test)]
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() {
            return Err("Amount cannot be empty".to_string());
        }

        // Reject .5 / -.5 format (must be 0.5)
        if s.starts_with('.') || s.starts_with("-.") {
            return Err("Invalid format: use 0.5 not .5".to_string());
        }

        // Reject 5. format (must be 5.0 or 5)
        if s.ends_with('.') {
            return Err("Invalid format: use 5.0 not 5.".to_string());
        }

        // Reject scientific notation (1.5e8, 1E10, etc.)
        if s.contains('e') || s.contains('E') {
            return Err("Invalid format: scientific notation not allowed".to_string());
        }

        if s.starts_with('+') {
            return Err("Invalid format: + prefix not allowed".to_string());
        }

        Decimal::from_str(s)
            .map(StrictDecimal)
            .map_err(|e| format!("Invalid decimal: {}", e))
    }
}

impl std::ops::Deref for StrictDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

struct StrictDecimalVisitor;

impl Visitor<'_> for StrictDecimalVisitor {
    type Value = StrictDecimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal number or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        StrictDecimal::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(StrictDecimal(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(StrictDecimal(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom("Invalid decimal: not a finite number"));
        }
        // Shortest round-trip text of the float, so 0.1 stays 0.1
        Decimal::from_str(&v.to_string())
            .map(StrictDecimal)
            .map_err(|e| E::custom(format!("Invalid decimal: {}", e)))
    }
}

impl<'de> Deserialize<'de> for StrictDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictDecimalVisitor)
    }
}

impl Serialize for StrictDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Render a record value for API output with two decimal places
pub fn format_value(value: Decimal) -> String {
    format!("{:.2}", value)
}

// ============================================================================
// Unit Tests
// ============================================================================
