//! Entity Store
//!
//! Durable keyed storage of benefit records with per-record version stamps.
//!
//! `conditional_update` is the only mutation primitive for existing records:
//!
//! ```text
//! read current ──▶ version == expected? ──no──▶ VersionConflict
//!                        │ yes
//!                        ▼
//!                  mutator(&mut record) ──value < 0──▶ NegativeValue
//!                        │            └──value > VALUE_MAX──▶ ValueOverflow
//!                        ▼
//!             persist, version += 1, updated_at = now
//! ```
//!
//! Backends serialize conditional updates per id only. Nothing locks across ids.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgBenefitStore;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::benefit::validation::VALUE_MAX;
use crate::benefit::{BenefitDraft, BenefitId, BenefitRecord, Version};
use crate::config::{StoreBackend, StoreConfig};

/// Field mutation applied inside a conditional update.
///
/// Identity, version and timestamps are restored by the store afterwards,
/// so a mutator can only change name, description, value and active.
/// Returning `Err` aborts the update without writing anything.
pub type Mutator<'a> = &'a (dyn Fn(&mut BenefitRecord) -> Result<(), StoreError> + Send + Sync);

/// Keyed benefit storage with optimistic concurrency
#[async_trait]
pub trait BenefitStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    async fn get(&self, id: BenefitId) -> Result<BenefitRecord, StoreError>;

    /// All records ordered by id
    async fn list(&self) -> Result<Vec<BenefitRecord>, StoreError>;

    /// Records with `active == true`, ordered by id
    async fn list_active(&self) -> Result<Vec<BenefitRecord>, StoreError>;

    /// Case-insensitive substring match on name, ordered by id
    async fn find_by_name(&self, needle: &str) -> Result<Vec<BenefitRecord>, StoreError>;

    /// Insert a new record with a fresh id and version 0
    async fn create(&self, draft: &BenefitDraft) -> Result<BenefitRecord, StoreError>;

    /// Apply `mutator` iff the stored version equals `expected_version`.
    ///
    /// Atomic with respect to other conditional updates on the same id.
    async fn conditional_update(
        &self,
        id: BenefitId,
        expected_version: Version,
        mutator: Mutator<'_>,
    ) -> Result<BenefitRecord, StoreError>;

    /// Remove a record permanently
    async fn delete(&self, id: BenefitId) -> Result<(), StoreError>;
}

/// Open the configured backend. PostgreSQL gets its schema created if missing.
pub async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn BenefitStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .postgres_url
                .as_deref()
                .context("store.postgres_url is required for the postgres backend")?;
            let store = PgBenefitStore::connect(url, config.max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            store
                .init_schema()
                .await
                .context("Failed to initialize benefits schema")?;
            info!(max_connections = config.max_connections, "Using PostgreSQL store");
            Ok(Arc::new(store))
        }
    }
}

/// Produce the next stored state of `current` under `mutator`.
///
/// Shared by all backends so the version, timestamp and value-range rules
/// are identical everywhere.
pub(crate) fn apply_mutation(
    current: &BenefitRecord,
    mutator: Mutator<'_>,
) -> Result<BenefitRecord, StoreError> {
    let mut next = current.clone();
    mutator(&mut next)?;

    if next.value < Decimal::ZERO {
        return Err(StoreError::NegativeValue(next.value));
    }
    if next.value > VALUE_MAX {
        return Err(StoreError::ValueOverflow(current.id));
    }

    next.id = current.id;
    next.version = current.version + 1;
    next.created_at = current.created_at;
    next.updated_at = Utc::now();
    Ok(next)
}
