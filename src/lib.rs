//! Benefit Ledger - balance transfer & consistency engine
//!
//! Named monetary "benefit" records with version-stamped optimistic
//! concurrency, and atomic value transfers between two of them.
//!
//! # Modules
//!
//! - [`benefit`] - Record model, field validation, CRUD service and read paths
//! - [`store`] - Entity store trait with memory (DashMap) and PostgreSQL backends
//! - [`transfer`] - Transfer validation and the debit/credit/compensate coordinator
//! - [`gateway`] - Axum HTTP surface
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup

pub mod benefit;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod store;
pub mod transfer;

// Convenient re-exports at crate root
pub use benefit::{
    BenefitDraft, BenefitError, BenefitId, BenefitRecord, BenefitService, ValidationError,
    Version,
};
pub use config::{AppConfig, TransferConfig};
pub use store::{BenefitStore, MemoryStore, PgBenefitStore, StoreError};
pub use transfer::{
    TransferCoordinator, TransferError, TransferPhase, TransferReceipt, TransferRequest,
};
