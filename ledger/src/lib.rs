//! The RELIEF token ledger.
//!
//! A capped-supply fungible balance store with pause and blacklist gates.
//! Single-step operations validate every precondition before mutating
//! anything; batch operations follow the shared fail-fast fold contract
//! ([`relief_types::BatchReport`]).

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::TokenLedger;
