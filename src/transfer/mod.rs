//! Balance Transfer
//!
//! Moves value between two benefit records as one logical unit on top of a
//! store that only offers single-key conditional writes.
//!
//! # Flow
//!
//! ```text
//!            ┌──────── VersionConflict (re-snapshot, re-validate) ────────┐
//!            ▼                                                           │
//! SNAPSHOT(from, to) → VALIDATE → DEBIT(from, from.version) ─────────────┘
//!                         │              │ ok
//!                         ▼              ▼
//!                      REJECTED   CREDIT(to, to.version) ⟲ conflict: re-read `to`, retry credit only
//!                                        │ ok          │ NotFound / inactive / exhausted
//!                                        ▼             ▼
//!                                    COMMITTED    COMPENSATE(from += amount) → DestinationVanished
//!                                                      │ failed                  or ConcurrencyExhausted
//!                                                      ▼
//!                                              CompensationFailed
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Validate-Before-Write**: every rejection happens before the first write
//! 2. **Debit-Once**: after a successful debit only the credit is retried
//! 3. **Conserve-Or-Report**: a debit is either matched by a credit, reversed by
//!    compensation, or reported as `CompensationFailed`
//! 4. **No Cross-Id Lock**: each step is a single-id conditional write

pub mod coordinator;
pub mod error;
pub mod types;
pub mod validation;


// Re-exports for convenience
pub use coordinator::TransferCoordinator;
pub use error::TransferError;
pub use types::{TransferPhase, TransferReceipt, TransferRequest};
pub use validation::validate_transfer;
