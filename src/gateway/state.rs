use std::sync::Arc;
use std::time::Instant;

use crate::benefit::BenefitService;
use crate::config::TransferConfig;
use crate::store::BenefitStore;
use crate::transfer::TransferCoordinator;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// CRUD and query surface
    pub benefits: Arc<BenefitService>,
    /// Balance transfers
    pub transfers: Arc<TransferCoordinator>,
    /// Backend name reported by the health endpoint
    pub store_backend: &'static str,
    started_at: Instant,
}

impl AppState {
    pub fn new(benefits: Arc<BenefitService>, transfers: Arc<TransferCoordinator>) -> Self {
        let store_backend = benefits.store().name();
        Self {
            benefits,
            transfers,
            store_backend,
            started_at: Instant::now(),
        }
    }

    /// Wire the service and the coordinator onto one shared store
    pub fn from_store(store: Arc<dyn BenefitStore>, transfer: TransferConfig) -> Self {
        let benefits = Arc::new(BenefitService::new(store.clone(), transfer.max_attempts));
        let transfers = Arc::new(TransferCoordinator::new(store, transfer));
        Self::new(benefits, transfers)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
