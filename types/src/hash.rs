//! Identity content commitment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque commitment to off-chain identity content (e.g. a biometric
/// digest computed outside the ledger). The ledger never interprets the
/// bytes; it only requires them to be non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(Vec<u8>);

impl ContentHash {
    /// The empty commitment, used for masked disclosure.
    pub const EMPTY: Self = Self(Vec::new());

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
