//! Account identifier type with `rlf_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RELIEF account identifier, always prefixed with `rlf_`.
///
/// The environment that delivers operations (wallet layer, signature
/// verification) is responsible for binding an identifier to a key; inside
/// the ledger an `AccountId` is just a unique, comparable name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all RELIEF account identifiers.
    pub const PREFIX: &'static str = "rlf_";

    /// Create a new account identifier from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `rlf_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "account id must start with rlf_");
        Self(s)
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this identifier is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
