//! State enums for identity records.

use serde::{Deserialize, Serialize};

/// The lifecycle status of an identity record.
///
/// `pending --verify(admin)--> active --revoke(admin)--> revoked`.
/// `Revoked` is terminal: the record persists but can never be verified again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityStatus {
    /// Record exists but has not been verified.
    Pending,
    /// Verified by an admin.
    Active,
    /// Revoked by an admin; verification permanently cleared.
    Revoked,
}

impl IdentityStatus {
    /// Whether the owner may still update the record's metadata.
    pub fn can_update_metadata(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this status admits no further verification transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revoked)
    }
}

/// Disclosure level for an identity record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivacyLevel {
    /// Outside viewers see a masked view of the record.
    Public = 0,
    /// Only the owner and admins may read the record.
    Restricted = 1,
    /// Only the owner and admins may read the record.
    Private = 2,
}

impl PrivacyLevel {
    /// Parse a raw level, rejecting anything above 2 at the boundary.
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Public),
            1 => Some(Self::Restricted),
            2 => Some(Self::Private),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Whether non-privileged callers get any view of the record at all.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}
