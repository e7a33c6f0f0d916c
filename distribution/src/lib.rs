//! Bulk distribution for RELIEF.
//!
//! The distribution engine applies repeated ledger transfers from the
//! designated distributor's own balance and keeps an append-only audit log
//! of every attempt. Settlement follows the shared fail-fast fold contract;
//! the audit record reflects intent, not guaranteed completion.

pub mod engine;
pub mod error;
pub mod record;

pub use engine::{DistributionEngine, DistributionOutcome};
pub use error::DistributionError;
pub use record::Distribution;
