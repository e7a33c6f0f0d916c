//! Full-state snapshots.
//!
//! A snapshot captures every persisted table of the node — balances,
//! identities, eligibility records, proposals, the distribution log, role
//! sets, counters, and the logical clock — with a deterministic Blake2b-256
//! integrity hash so a restored node can prove the bytes were not tampered
//! with in storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use relief_claims::FundingStrategy;
use relief_store::{SnapshotStore, StoreError};

use crate::node::ReliefNode;

/// Bumped when the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot hash mismatch — bytes were tampered with or truncated")]
    HashMismatch,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A point-in-time copy of the whole node, plus integrity metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub version: u32,
    /// Blake2b-256 over the canonical (sorted) state encoding.
    pub hash: [u8; 32],
    node: ReliefNode,
}

impl NodeSnapshot {
    /// Capture the current state of `node`.
    pub fn capture(node: &ReliefNode) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            hash: compute_hash(node),
            node: node.clone(),
        }
    }

    /// Verify the integrity hash against the captured state.
    pub fn verify(&self) -> bool {
        self.hash == compute_hash(&self.node)
    }

    /// Recover the node, refusing tampered or incompatible snapshots.
    pub fn into_node(self) -> Result<ReliefNode, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if !self.verify() {
            return Err(SnapshotError::HashMismatch);
        }
        Ok(self.node)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Capture `node` and persist it through `store`.
    pub fn save(node: &ReliefNode, store: &dyn SnapshotStore) -> Result<(), SnapshotError> {
        let snapshot = Self::capture(node);
        store.save(&snapshot.to_bytes())?;
        Ok(())
    }

    /// Load and verify the last snapshot from `store`, if any.
    pub fn load(store: &dyn SnapshotStore) -> Result<Option<ReliefNode>, SnapshotError> {
        match store.load()? {
            Some(bytes) => {
                let snapshot = Self::from_bytes(&bytes)?;
                Ok(Some(snapshot.into_node()?))
            }
            None => Ok(None),
        }
    }
}

/// Deterministic Blake2b-256 over the node state.
///
/// Map-backed tables are folded in sorted order so the hash does not depend
/// on `HashMap` iteration order.
fn compute_hash(node: &ReliefNode) -> [u8; 32] {
    use blake2::digest::consts::U32;
    use blake2::{Blake2b, Digest};

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(node.clock().value().to_le_bytes());
    hasher.update(node.ledger().total_supply().raw().to_le_bytes());
    hasher.update(node.ledger().max_supply().raw().to_le_bytes());
    hasher.update([node.ledger().is_paused() as u8]);

    let mut balances: Vec<_> = node.ledger().balances().collect();
    balances.sort_by(|a, b| a.0.cmp(b.0));
    for (account, amount) in balances {
        hasher.update(account.as_str().as_bytes());
        hasher.update(amount.raw().to_le_bytes());
    }

    let mut blacklist: Vec<_> = node.ledger().blacklisted().collect();
    blacklist.sort();
    for account in blacklist {
        hasher.update(account.as_str().as_bytes());
    }

    hasher.update(node.access().owner().as_str().as_bytes());
    let mut admins: Vec<_> = node.access().admins().collect();
    admins.sort();
    for admin in admins {
        hasher.update(admin.as_str().as_bytes());
    }
    if let Some(distributor) = node.access().distributor() {
        hasher.update(distributor.as_str().as_bytes());
    }

    hasher.update([node.identities().is_paused() as u8]);
    for record in node.identities().records() {
        hasher.update(record.id.to_le_bytes());
        hasher.update(record.owner.as_str().as_bytes());
        hasher.update(record.content_hash.as_bytes());
        hasher.update([
            record.verified as u8,
            record.privacy_level.as_u8(),
            record.status as u8,
        ]);
        hasher.update(
            record
                .verified_at
                .map_or(0u64, |s| s.value())
                .to_le_bytes(),
        );
        hasher.update(record.metadata.as_bytes());
    }
    hasher.update(node.identities().next_id().to_le_bytes());

    let mut eligibility: Vec<_> = node.eligibility().records().collect();
    eligibility.sort_by(|a, b| a.account.cmp(&b.account));
    for record in eligibility {
        hasher.update(record.account.as_str().as_bytes());
        hasher.update(record.identity_id.to_le_bytes());
        hasher.update([record.eligible as u8]);
        hasher.update(record.last_claim.value().to_le_bytes());
    }

    for distribution in node.distributions().history() {
        hasher.update(distribution.id.to_le_bytes());
        hasher.update(distribution.distributor.as_str().as_bytes());
        hasher.update(distribution.amount.raw().to_le_bytes());
        for recipient in &distribution.recipients {
            hasher.update(recipient.as_str().as_bytes());
        }
        hasher.update(distribution.recorded_at.value().to_le_bytes());
    }
    hasher.update(node.distributions().next_id().to_le_bytes());

    for proposal in node.governance().proposals() {
        hasher.update(proposal.id.to_le_bytes());
        hasher.update(proposal.proposer.as_str().as_bytes());
        hasher.update(proposal.description.as_bytes());
        update_action(&mut hasher, &proposal.action);
        hasher.update(proposal.votes_for.to_le_bytes());
        hasher.update(proposal.votes_against.to_le_bytes());
        let mut voters: Vec<_> = proposal.voters.iter().collect();
        voters.sort();
        for voter in voters {
            hasher.update(voter.as_str().as_bytes());
        }
        hasher.update([proposal.executed as u8]);
        hasher.update(proposal.created_at.value().to_le_bytes());
    }
    hasher.update(node.governance().next_id().to_le_bytes());
    hasher.update(node.governance().min_votes().to_le_bytes());

    let params = node.params();
    hasher.update(params.max_supply.to_le_bytes());
    hasher.update(params.claim_amount.to_le_bytes());
    hasher.update(params.claim_cooldown.to_le_bytes());
    hasher.update(params.governance_min_votes.to_le_bytes());
    for bound in [
        params.description_max_len,
        params.metadata_max_len,
        params.max_batch_mint,
        params.max_batch_blacklist,
        params.max_batch_verify,
        params.max_distribution_recipients,
    ] {
        hasher.update((bound as u64).to_le_bytes());
    }

    hasher.update(node.claims().claim_amount().raw().to_le_bytes());
    hasher.update(node.claims().cooldown().to_le_bytes());
    match node.claims().funding() {
        FundingStrategy::MintOnClaim => hasher.update([0u8]),
        FundingStrategy::DebitTreasury { treasury } => {
            hasher.update([1u8]);
            hasher.update(treasury.as_str().as_bytes());
        }
    }

    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

fn update_action(
    hasher: &mut blake2::Blake2b<blake2::digest::consts::U32>,
    action: &relief_governance::ProposalAction,
) {
    use blake2::Digest;
    use relief_governance::ProposalAction;
    match action {
        ProposalAction::None => hasher.update([0u8]),
        ProposalAction::GrantAdmin(account) => {
            hasher.update([1u8]);
            hasher.update(account.as_str().as_bytes());
        }
        ProposalAction::RevokeAdmin(account) => {
            hasher.update([2u8]);
            hasher.update(account.as_str().as_bytes());
        }
        ProposalAction::SetDistributor(account) => {
            hasher.update([3u8]);
            hasher.update(account.as_str().as_bytes());
        }
    }
}
