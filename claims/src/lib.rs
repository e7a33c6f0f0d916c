//! Eligibility tracking and claim processing for RELIEF.
//!
//! The [`EligibilityStore`] is a self-contained record store; the
//! [`ClaimProcessor`] is the one cross-cutting operation in the system — it
//! validates eligibility and cooldown, then mutates the token ledger and the
//! eligibility record as a single logical transaction.

pub mod eligibility;
pub mod error;
pub mod funding;
pub mod processor;

pub use eligibility::{EligibilityRecord, EligibilityStore};
pub use error::ClaimError;
pub use funding::FundingStrategy;
pub use processor::ClaimProcessor;
