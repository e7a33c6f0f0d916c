//! Identity record and its disclosure view.

use serde::{Deserialize, Serialize};

use relief_types::{AccountId, ContentHash, IdentityStatus, PrivacyLevel, Sequence};

/// A per-account identity record.
///
/// Created on mint, never deleted. Revocation is terminal for verification
/// but the record persists as an audit trail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    /// The minting account. Ownership never changes.
    pub owner: AccountId,
    /// Commitment to off-chain identity content.
    pub content_hash: ContentHash,
    pub verified: bool,
    /// Sequence at which verification happened.
    pub verified_at: Option<Sequence>,
    pub privacy_level: PrivacyLevel,
    pub metadata: String,
    pub status: IdentityStatus,
}

/// What a `details` call discloses.
///
/// Owners and admins get the full record. Outside viewers of a
/// [`PrivacyLevel::Public`] record get a masked view: the sensitive fields
/// (`content_hash`, `metadata`) come back empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityDetails {
    pub id: u64,
    pub owner: AccountId,
    pub content_hash: ContentHash,
    pub verified: bool,
    pub verified_at: Option<Sequence>,
    pub privacy_level: PrivacyLevel,
    pub metadata: String,
    pub status: IdentityStatus,
}

impl IdentityDetails {
    /// Full disclosure, for the owner or an admin.
    pub fn full(record: &IdentityRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner.clone(),
            content_hash: record.content_hash.clone(),
            verified: record.verified,
            verified_at: record.verified_at,
            privacy_level: record.privacy_level,
            metadata: record.metadata.clone(),
            status: record.status,
        }
    }

    /// Masked disclosure for outside viewers of a public record.
    pub fn masked(record: &IdentityRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner.clone(),
            content_hash: ContentHash::EMPTY,
            verified: record.verified,
            verified_at: record.verified_at,
            privacy_level: record.privacy_level,
            metadata: String::new(),
            status: record.status,
        }
    }
}
