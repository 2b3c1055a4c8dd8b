//! HTTP handlers
//!
//! - [`benefit`]: CRUD and query surface
//! - [`transfer`]: balance transfer
//! - [`health`]: liveness

pub mod benefit;
pub mod health;
pub mod transfer;

pub use benefit::{
    create_benefit, deactivate_benefit, delete_benefit, get_benefit, list_active_benefits,
    list_benefits, search_benefits, update_benefit,
};
pub use health::{HealthResponse, health_check};
pub use transfer::create_transfer;

