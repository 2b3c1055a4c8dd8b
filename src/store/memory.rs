//! In-memory entity store
//!
//! Records live in a `DashMap` keyed by id. A conditional update holds the
//! entry's write guard for the whole read-check-mutate-write step, which is
//! what serializes concurrent writers on the same id.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{BenefitStore, Mutator, StoreError, apply_mutation};
use crate::benefit::{BenefitDraft, BenefitId, BenefitRecord, Version};

/// Thread-safe in-memory benefit store
pub struct MemoryStore {
    records: DashMap<BenefitId, BenefitRecord>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create a new empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn sorted(mut records: Vec<BenefitRecord>) -> Vec<BenefitRecord> {
        records.sort_by_key(|r| r.id);
        records
    }

    fn collect_where(&self, pred: impl Fn(&BenefitRecord) -> bool) -> Vec<BenefitRecord> {
        Self::sorted(
            self.records
                .iter()
                .filter(|entry| pred(entry.value()))
                .map(|entry| entry.value().clone())
                .collect(),
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BenefitStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, id: BenefitId) -> Result<BenefitRecord, StoreError> {
        self.records
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<BenefitRecord>, StoreError> {
        Ok(self.collect_where(|_| true))
    }

    async fn list_active(&self) -> Result<Vec<BenefitRecord>, StoreError> {
        Ok(self.collect_where(|r| r.active))
    }

    async fn find_by_name(&self, needle: &str) -> Result<Vec<BenefitRecord>, StoreError> {
        let needle = needle.to_lowercase();
        Ok(self.collect_where(|r| r.name.to_lowercase().contains(&needle)))
    }

    async fn create(&self, draft: &BenefitDraft) -> Result<BenefitRecord, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let record = BenefitRecord {
            id,
            name: draft.name().to_string(),
            description: draft.description().map(str::to_string),
            value: draft.value(),
            active: draft.active(),
            version: 0,
            created_at: now,
            updated_at: now,
        };

        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn conditional_update(
        &self,
        id: BenefitId,
        expected_version: Version,
        mutator: Mutator<'_>,
    ) -> Result<BenefitRecord, StoreError> {
        // Write guard held until the end of this block
        let mut entry = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if entry.version != expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: expected_version,
                actual: entry.version,
            });
        }

        let next = apply_mutation(&entry, mutator)?;
        *entry = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: BenefitId) -> Result<(), StoreError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
