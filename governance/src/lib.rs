//! Governance for the RELIEF ledger.
//!
//! Anyone may propose; votes accumulate on open proposals (one vote per
//! account per proposal); execution is gated by a minimum-vote threshold and
//! a simple majority, flips the terminal `executed` flag, and hands the
//! proposal's action to a pluggable hook — role changes in the access
//! registry are applied by the surrounding system, not in here.

pub mod action;
pub mod engine;
pub mod error;
pub mod proposal;

pub use action::{NoopHook, ProposalAction, ProposalHook};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::Proposal;
