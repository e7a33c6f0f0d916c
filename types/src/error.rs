//! Error taxonomy shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable classification of every failure the ledger can return.
///
/// Component crates define their own `thiserror` enums with structured
/// fields; each maps onto exactly one of these kinds so callers can react to
/// the class of failure without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Authorization,
    /// Zero or out-of-range amount, oversized metadata, malformed hash.
    InvalidInput,
    /// Record already exists / already verified / already executed.
    StateConflict,
    /// Supply cap or bounded-list size exceeded.
    ResourceLimit,
    /// Paused, blacklisted, cooldown not elapsed, threshold not met.
    PolicyViolation,
    /// The referenced record does not exist.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authorization => "authorization",
            Self::InvalidInput => "invalid-input",
            Self::StateConflict => "state-conflict",
            Self::ResourceLimit => "resource-limit",
            Self::PolicyViolation => "policy-violation",
            Self::NotFound => "not-found",
        };
        write!(f, "{name}")
    }
}
