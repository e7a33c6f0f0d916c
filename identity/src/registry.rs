//! The identity registry and its lifecycle operations.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use relief_access::{AccessRegistry, Capability};
use relief_types::{AccountId, BatchReport, ContentHash, IdentityStatus, PrivacyLevel, Sequence};

use crate::error::IdentityError;
use crate::record::{IdentityDetails, IdentityRecord};

/// Keyed store of identity records with a monotonic id counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityRegistry {
    records: BTreeMap<u64, IdentityRecord>,
    owner_index: HashMap<AccountId, Vec<u64>>,
    /// Next id to assign. Starts at 1; ids are never reused.
    next_id: u64,
    paused: bool,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            owner_index: HashMap::new(),
            next_id: 1,
            paused: false,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn get(&self, id: u64) -> Option<&IdentityRecord> {
        self.records.get(&id)
    }

    pub fn ids_owned_by(&self, account: &AccountId) -> &[u64] {
        self.owner_index
            .get(account)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn records(&self) -> impl Iterator<Item = &IdentityRecord> {
        self.records.values()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Mint a new identity record owned by `caller`. Returns the assigned id.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        content_hash: ContentHash,
        metadata: String,
        privacy_level: PrivacyLevel,
        metadata_max_len: usize,
    ) -> Result<u64, IdentityError> {
        if self.paused {
            return Err(IdentityError::Paused);
        }
        if content_hash.is_empty() {
            return Err(IdentityError::InvalidHash);
        }
        if metadata.len() > metadata_max_len {
            return Err(IdentityError::InvalidMetadata {
                len: metadata.len(),
                max: metadata_max_len,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            IdentityRecord {
                id,
                owner: caller.clone(),
                content_hash,
                verified: false,
                verified_at: None,
                privacy_level,
                metadata,
                status: IdentityStatus::Pending,
            },
        );
        self.owner_index.entry(caller.clone()).or_default().push(id);
        info!(%caller, id, "identity minted");
        Ok(id)
    }

    /// Verify a pending identity. Admin capability.
    pub fn verify(
        &mut self,
        caller: &AccountId,
        id: u64,
        now: Sequence,
        access: &AccessRegistry,
    ) -> Result<(), IdentityError> {
        let record = self.records.get_mut(&id).ok_or(IdentityError::NotFound(id))?;
        access.require(caller, Capability::VerifyIdentity)?;
        if record.verified {
            return Err(IdentityError::AlreadyVerified(id));
        }
        if record.status.is_terminal() {
            return Err(IdentityError::Revoked(id));
        }

        record.verified = true;
        record.verified_at = Some(now);
        record.status = IdentityStatus::Active;
        info!(%caller, id, %now, "identity verified");
        Ok(())
    }

    /// Replace the metadata of a verified identity. Owner-only.
    pub fn update_metadata(
        &mut self,
        caller: &AccountId,
        id: u64,
        new_metadata: String,
        metadata_max_len: usize,
    ) -> Result<(), IdentityError> {
        let record = self.records.get_mut(&id).ok_or(IdentityError::NotFound(id))?;
        if record.owner != *caller {
            return Err(IdentityError::NotAuthorized {
                caller: caller.to_string(),
                id,
            });
        }
        if !record.verified {
            return Err(IdentityError::NotVerified(id));
        }
        if new_metadata.len() > metadata_max_len {
            return Err(IdentityError::InvalidMetadata {
                len: new_metadata.len(),
                max: metadata_max_len,
            });
        }
        record.metadata = new_metadata;
        debug!(%caller, id, "identity metadata updated");
        Ok(())
    }

    /// Change the disclosure level. Owner-only.
    pub fn set_privacy_level(
        &mut self,
        caller: &AccountId,
        id: u64,
        level: PrivacyLevel,
    ) -> Result<(), IdentityError> {
        let record = self.records.get_mut(&id).ok_or(IdentityError::NotFound(id))?;
        if record.owner != *caller {
            return Err(IdentityError::NotAuthorized {
                caller: caller.to_string(),
                id,
            });
        }
        record.privacy_level = level;
        debug!(%caller, id, level = level.as_u8(), "privacy level set");
        Ok(())
    }

    /// Revoke an identity. Admin capability. Terminal: clears `verified`,
    /// the record itself persists.
    pub fn revoke(
        &mut self,
        caller: &AccountId,
        id: u64,
        access: &AccessRegistry,
    ) -> Result<(), IdentityError> {
        let record = self.records.get_mut(&id).ok_or(IdentityError::NotFound(id))?;
        access.require(caller, Capability::RevokeIdentity)?;
        if record.status.is_terminal() {
            return Err(IdentityError::AlreadyRevoked(id));
        }
        record.status = IdentityStatus::Revoked;
        record.verified = false;
        info!(%caller, id, "identity revoked");
        Ok(())
    }

    /// Identities are permanently non-transferable. Always fails, for any
    /// arguments, and never mutates ownership.
    pub fn transfer(
        &self,
        _caller: &AccountId,
        _id: u64,
        _recipient: &AccountId,
    ) -> Result<(), IdentityError> {
        Err(IdentityError::TransferNotAllowed)
    }

    /// Privacy-gated disclosure.
    ///
    /// Owner and admins see the full record. Everyone else sees a masked
    /// view when the record is public, and is rejected otherwise.
    pub fn details(
        &self,
        caller: &AccountId,
        id: u64,
        access: &AccessRegistry,
    ) -> Result<IdentityDetails, IdentityError> {
        let record = self.records.get(&id).ok_or(IdentityError::NotFound(id))?;
        if record.owner == *caller || access.is_admin(caller) {
            return Ok(IdentityDetails::full(record));
        }
        if record.privacy_level.is_public() {
            return Ok(IdentityDetails::masked(record));
        }
        Err(IdentityError::NotAuthorized {
            caller: caller.to_string(),
            id,
        })
    }

    /// Verify up to `max` identities in one call.
    ///
    /// Caller authorization and the size bound reject the whole call; after
    /// that the ids fold left-to-right and stop at the first failure without
    /// un-verifying prior elements.
    pub fn verify_batch(
        &mut self,
        caller: &AccountId,
        ids: &[u64],
        now: Sequence,
        max: usize,
        access: &AccessRegistry,
    ) -> Result<BatchReport<IdentityError>, IdentityError> {
        access.require(caller, Capability::VerifyIdentity)?;
        if ids.len() > max {
            return Err(IdentityError::BatchLimitExceeded {
                len: ids.len(),
                max,
            });
        }
        let mut applied = 0u32;
        for &id in ids {
            if let Err(e) = self.verify(caller, id, now, access) {
                return Ok(BatchReport::halted_at(applied, e));
            }
            applied += 1;
        }
        info!(%caller, applied, "batch verification complete");
        Ok(BatchReport::complete(applied))
    }

    /// Pause or unpause identity minting.
    pub fn set_paused(
        &mut self,
        caller: &AccountId,
        flag: bool,
        access: &AccessRegistry,
    ) -> Result<(), IdentityError> {
        access.require(caller, Capability::Pause)?;
        self.paused = flag;
        info!(%caller, paused = flag, "identity registry pause flag set");
        Ok(())
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> AccountId {
        AccountId::new(format!("rlf_{s}"))
    }

    fn hash() -> ContentHash {
        ContentHash::new(vec![0xAB; 32])
    }

    fn setup() -> (IdentityRegistry, AccessRegistry) {
        let mut access = AccessRegistry::new(acct("owner"));
        access.promote_admin(acct("admin"));
        (IdentityRegistry::new(), access)
    }

    fn minted(reg: &mut IdentityRegistry, owner: &str, level: PrivacyLevel) -> u64 {
        reg.mint(&acct(owner), hash(), "camp 7".into(), level, 256)
            .unwrap()
    }

    #[test]
    fn mint_assigns_monotonic_ids() {
        let (mut reg, _) = setup();
        let a = minted(&mut reg, "u1", PrivacyLevel::Public);
        let b = minted(&mut reg, "u1", PrivacyLevel::Private);
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(reg.ids_owned_by(&acct("u1")), &[1, 2]);
        assert_eq!(reg.get(a).unwrap().status, IdentityStatus::Pending);
        assert!(!reg.get(a).unwrap().verified);
    }

    #[test]
    fn mint_rejects_empty_hash_and_long_metadata() {
        let (mut reg, _) = setup();
        let empty = reg.mint(
            &acct("u1"),
            ContentHash::EMPTY,
            String::new(),
            PrivacyLevel::Public,
            256,
        );
        assert!(matches!(empty, Err(IdentityError::InvalidHash)));

        let long = reg.mint(
            &acct("u1"),
            hash(),
            "x".repeat(300),
            PrivacyLevel::Public,
            256,
        );
        assert!(matches!(
            long,
            Err(IdentityError::InvalidMetadata { len: 300, max: 256 })
        ));
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn verify_lifecycle() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);

        reg.verify(&acct("admin"), id, Sequence::new(10), &access)
            .unwrap();
        let record = reg.get(id).unwrap();
        assert!(record.verified);
        assert_eq!(record.verified_at, Some(Sequence::new(10)));
        assert_eq!(record.status, IdentityStatus::Active);

        let again = reg.verify(&acct("admin"), id, Sequence::new(11), &access);
        assert!(matches!(again, Err(IdentityError::AlreadyVerified(_))));
    }

    #[test]
    fn verify_requires_admin() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);
        let result = reg.verify(&acct("u1"), id, Sequence::new(1), &access);
        assert!(matches!(result, Err(IdentityError::Access(_))));
        assert!(!reg.get(id).unwrap().verified);
    }

    #[test]
    fn revoked_is_terminal_for_verification() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);
        reg.verify(&acct("admin"), id, Sequence::new(1), &access)
            .unwrap();
        reg.revoke(&acct("admin"), id, &access).unwrap();

        let record = reg.get(id).unwrap();
        assert_eq!(record.status, IdentityStatus::Revoked);
        assert!(!record.verified);

        let reverify = reg.verify(&acct("admin"), id, Sequence::new(2), &access);
        assert!(matches!(reverify, Err(IdentityError::Revoked(_))));

        let rerevoke = reg.revoke(&acct("admin"), id, &access);
        assert!(matches!(rerevoke, Err(IdentityError::AlreadyRevoked(_))));
    }

    #[test]
    fn metadata_update_requires_owner_and_verification() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);

        let unverified = reg.update_metadata(&acct("u1"), id, "new".into(), 256);
        assert!(matches!(unverified, Err(IdentityError::NotVerified(_))));

        reg.verify(&acct("admin"), id, Sequence::new(1), &access)
            .unwrap();
        let stranger = reg.update_metadata(&acct("u2"), id, "new".into(), 256);
        assert!(matches!(stranger, Err(IdentityError::NotAuthorized { .. })));

        reg.update_metadata(&acct("u1"), id, "camp 9".into(), 256)
            .unwrap();
        assert_eq!(reg.get(id).unwrap().metadata, "camp 9");
    }

    #[test]
    fn transfer_always_fails_and_owner_never_changes() {
        let (mut reg, _) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);
        let result = reg.transfer(&acct("u1"), id, &acct("u2"));
        assert!(matches!(result, Err(IdentityError::TransferNotAllowed)));
        let result = reg.transfer(&acct("admin"), id, &acct("u2"));
        assert!(matches!(result, Err(IdentityError::TransferNotAllowed)));
        assert_eq!(reg.get(id).unwrap().owner, acct("u1"));
    }

    #[test]
    fn details_full_for_owner_and_admin() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Private);

        let own = reg.details(&acct("u1"), id, &access).unwrap();
        assert_eq!(own.metadata, "camp 7");
        assert!(!own.content_hash.is_empty());

        let admin = reg.details(&acct("admin"), id, &access).unwrap();
        assert_eq!(admin, own);
    }

    #[test]
    fn details_masked_for_outsiders_on_public_records() {
        let (mut reg, access) = setup();
        let id = minted(&mut reg, "u1", PrivacyLevel::Public);
        let view = reg.details(&acct("stranger"), id, &access).unwrap();
        assert!(view.content_hash.is_empty());
        assert!(view.metadata.is_empty());
        assert_eq!(view.owner, acct("u1"));
    }

    #[test]
    fn details_rejected_for_outsiders_on_private_records() {
        let (mut reg, access) = setup();
        for level in [PrivacyLevel::Restricted, PrivacyLevel::Private] {
            let id = minted(&mut reg, "u1", level);
            let result = reg.details(&acct("stranger"), id, &access);
            assert!(matches!(result, Err(IdentityError::NotAuthorized { .. })));
        }
    }

    #[test]
    fn batch_verify_fail_fast() {
        let (mut reg, access) = setup();
        let a = minted(&mut reg, "u1", PrivacyLevel::Public);
        let b = minted(&mut reg, "u2", PrivacyLevel::Public);
        let c = minted(&mut reg, "u3", PrivacyLevel::Public);
        // b is already verified, so the fold halts there.
        reg.verify(&acct("admin"), b, Sequence::new(1), &access)
            .unwrap();

        let report = reg
            .verify_batch(&acct("admin"), &[a, b, c], Sequence::new(2), 10, &access)
            .unwrap();
        assert_eq!(report.applied, 1);
        assert!(matches!(
            report.halted,
            Some(IdentityError::AlreadyVerified(_))
        ));
        assert!(reg.get(a).unwrap().verified);
        assert!(!reg.get(c).unwrap().verified);
    }

    #[test]
    fn batch_verify_bound() {
        let (mut reg, access) = setup();
        let ids: Vec<u64> = (0..11)
            .map(|_| minted(&mut reg, "u1", PrivacyLevel::Public))
            .collect();
        let result = reg.verify_batch(&acct("admin"), &ids, Sequence::new(1), 10, &access);
        assert!(matches!(
            result,
            Err(IdentityError::BatchLimitExceeded { len: 11, max: 10 })
        ));
        assert!(reg.records().all(|r| !r.verified));
    }

    #[test]
    fn paused_registry_rejects_mint() {
        let (mut reg, access) = setup();
        reg.set_paused(&acct("admin"), true, &access).unwrap();
        let result = reg.mint(
            &acct("u1"),
            hash(),
            String::new(),
            PrivacyLevel::Public,
            256,
        );
        assert!(matches!(result, Err(IdentityError::Paused)));
    }
}
