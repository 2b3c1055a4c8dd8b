//! Benefit service: CRUD plus the read-only query surface
//!
//! Reads go straight to the store. Writes go through
//! `BenefitStore::conditional_update`, either against a caller-supplied
//! version (stale -> `StaleVersion`) or against a fresh read with a bounded
//! retry when the caller did not observe a version.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::BenefitError;
use super::models::{BenefitDraft, BenefitId, BenefitRecord, Version};
use crate::config::SeedBenefit;
use crate::store::{BenefitStore, Mutator, StoreError};

pub struct BenefitService {
    store: Arc<dyn BenefitStore>,
    max_attempts: u32,
}

impl BenefitService {
    pub fn new(store: Arc<dyn BenefitStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn store(&self) -> &Arc<dyn BenefitStore> {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------------

    pub async fn list_all(&self) -> Result<Vec<BenefitRecord>, BenefitError> {
        Ok(self.store.list().await?)
    }

    pub async fn list_active(&self) -> Result<Vec<BenefitRecord>, BenefitError> {
        Ok(self.store.list_active().await?)
    }

    pub async fn get(&self, id: BenefitId) -> Result<BenefitRecord, BenefitError> {
        Ok(self.store.get(id).await?)
    }

    /// Case-insensitive substring search. An empty term matches every record;
    /// callers that want "blank means list all" decide that themselves.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<BenefitRecord>, BenefitError> {
        Ok(self.store.find_by_name(term).await?)
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub async fn create(&self, draft: BenefitDraft) -> Result<BenefitRecord, BenefitError> {
        let record = self.store.create(&draft).await?;
        info!(id = record.id, name = %record.name, value = %record.value, "Benefit created");
        Ok(record)
    }

    /// Replace the full field set.
    ///
    /// With `expected_version`, a mismatch fails with `StaleVersion`.
    /// Without it, the edit applies on top of whatever is current.
    pub async fn update(
        &self,
        id: BenefitId,
        draft: BenefitDraft,
        expected_version: Option<Version>,
    ) -> Result<BenefitRecord, BenefitError> {
        let apply = |r: &mut BenefitRecord| -> Result<(), StoreError> {
            r.apply_draft(&draft);
            Ok(())
        };

        let record = match expected_version {
            Some(version) => self.store.conditional_update(id, version, &apply).await?,
            None => self.update_latest(id, &apply).await?,
        };

        info!(id, version = record.version, "Benefit updated");
        Ok(record)
    }

    /// Soft delete: `active = false`, version bumps even if already inactive
    pub async fn deactivate(&self, id: BenefitId) -> Result<BenefitRecord, BenefitError> {
        let record = self
            .update_latest(id, &|r: &mut BenefitRecord| {
                r.active = false;
                Ok(())
            })
            .await?;
        info!(id, version = record.version, "Benefit deactivated");
        Ok(record)
    }

    /// Create the configured seed records, returning how many were created.
    ///
    /// Skipped when the store already holds records, so a restart against a
    /// persistent backend does not duplicate them.
    pub async fn seed(&self, seeds: &[SeedBenefit]) -> Result<usize, BenefitError> {
        if seeds.is_empty() || !self.store.list().await?.is_empty() {
            return Ok(0);
        }

        // Validate everything before the first insert
        let drafts = seeds
            .iter()
            .map(|s| BenefitDraft::new(&s.name, s.description.as_deref(), s.value, s.active))
            .collect::<Result<Vec<_>, _>>()?;

        for draft in &drafts {
            self.store.create(draft).await?;
        }
        info!(count = drafts.len(), "Seed benefits created");
        Ok(drafts.len())
    }

    /// Permanent removal
    pub async fn delete(&self, id: BenefitId) -> Result<(), BenefitError> {
        self.store.delete(id).await?;
        info!(id, "Benefit deleted");
        Ok(())
    }

    /// Read-then-CAS until the write lands or attempts run out
    async fn update_latest(
        &self,
        id: BenefitId,
        mutator: Mutator<'_>,
    ) -> Result<BenefitRecord, BenefitError> {
        for attempt in 1..=self.max_attempts {
            let current = self.store.get(id).await?;
            match self
                .store
                .conditional_update(id, current.version, mutator)
                .await
            {
                Ok(record) => return Ok(record),
                Err(StoreError::VersionConflict { actual, .. }) => {
                    debug!(id, attempt, actual, "Version moved under edit, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(id, attempts = self.max_attempts, "Edit gave up after repeated conflicts");
        Err(BenefitError::Busy(id))
    }
}
