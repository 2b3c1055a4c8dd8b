//! Benefit records
//!
//! - [`models`]: `BenefitRecord` and the validated `BenefitDraft` field set
//! - [`validation`]: field-level invariants (name length, description length, value)
//! - [`service`]: CRUD operations and the read-only query surface
//! - [`error`]: `BenefitError` for the CRUD service

pub mod error;
pub mod models;
pub mod service;
pub mod validation;

pub use error::BenefitError;
pub use models::{BenefitDraft, BenefitId, BenefitRecord, Version};
pub use service::BenefitService;
pub use validation::ValidationError;
