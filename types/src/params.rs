//! Protocol parameters — supply cap, claim policy, and batch bounds.

use crate::amount::AMOUNT_UNIT;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde bridge for `u128` fields that must also load from TOML, whose
/// integer type tops out at 64 bits. Values round-trip through `u64` so the
/// same field is readable from both a TOML config and a bincode snapshot.
mod u128_via_u64 {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        Ok(u64::deserialize(deserializer)? as u128)
    }
}

/// All tunable parameters of a RELIEF deployment.
///
/// Loaded at genesis and thereafter adjusted only through governance.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    // ── Supply ───────────────────────────────────────────────────────────
    /// Hard cap on total supply (raw units). `total_supply` never exceeds it.
    #[serde(with = "u128_via_u64")]
    pub max_supply: u128,

    // ── Claims ───────────────────────────────────────────────────────────
    /// Fixed credit (raw units) per successful claim.
    #[serde(with = "u128_via_u64")]
    pub claim_amount: u128,

    /// Minimum sequence distance between two successful claims by the same
    /// account.
    pub claim_cooldown: u64,

    // ── Governance ───────────────────────────────────────────────────────
    /// Minimum `votes_for` before a proposal may execute.
    pub governance_min_votes: u32,

    /// Maximum length of a proposal description.
    pub description_max_len: usize,

    // ── Identity ─────────────────────────────────────────────────────────
    /// Maximum length of identity metadata.
    pub metadata_max_len: usize,

    // ── Batch bounds ─────────────────────────────────────────────────────
    /// Maximum entries per batch mint call.
    pub max_batch_mint: usize,

    /// Maximum accounts per batch blacklist call.
    pub max_batch_blacklist: usize,

    /// Maximum identities per batch verification call.
    pub max_batch_verify: usize,

    /// Maximum recipients per distribution call.
    pub max_distribution_recipients: usize,
}

impl ProtocolParams {
    /// RELIEF defaults — the intended configuration for a live deployment.
    pub fn relief_defaults() -> Self {
        Self {
            max_supply: 100_000_000 * AMOUNT_UNIT,
            claim_amount: 50 * AMOUNT_UNIT,
            claim_cooldown: 86_400,
            governance_min_votes: 10,
            description_max_len: 512,
            metadata_max_len: 256,
            max_batch_mint: 5,
            max_batch_blacklist: 5,
            max_batch_verify: 10,
            max_distribution_recipients: 100,
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::relief_defaults()
    }
}
