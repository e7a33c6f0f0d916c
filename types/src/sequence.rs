//! Logical clock type used throughout the ledger.
//!
//! RELIEF measures time in sequence numbers supplied by the surrounding
//! environment, not wall-clock seconds. Claim cooldowns and verification
//! stamps are distances on this monotonically increasing counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical clock value — a monotonically increasing sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sequence(u64);

impl Sequence {
    /// Sequence zero — the value of `last_claim` before any claim.
    pub const EPOCH: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Ticks elapsed since this sequence value (relative to `now`).
    pub fn elapsed_since(&self, now: Sequence) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether `window` ticks have passed since this value, relative to `now`.
    pub fn has_elapsed(&self, window: u64, now: Sequence) -> bool {
        now.0 >= self.0.saturating_add(window)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq {}", self.0)
    }
}
