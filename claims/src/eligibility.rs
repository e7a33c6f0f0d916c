//! Per-account eligibility records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use relief_access::{AccessRegistry, Capability};
use relief_types::{AccountId, Sequence};

use crate::error::ClaimError;

/// Eligibility flag and last-claim stamp for one beneficiary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub account: AccountId,
    /// The identity record this registration is based on.
    pub identity_id: u64,
    pub eligible: bool,
    /// Sequence of the last successful claim; `EPOCH` before the first one.
    pub last_claim: Sequence,
}

/// Keyed store of eligibility records.
///
/// Registration and eligibility flips are admin-gated; the last-claim stamp
/// is mutated only by claim processing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EligibilityStore {
    records: HashMap<AccountId, EligibilityRecord>,
}

impl EligibilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account: &AccountId) -> Option<&EligibilityRecord> {
        self.records.get(account)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &EligibilityRecord> {
        self.records.values()
    }

    /// Register a beneficiary. Admin capability; one record per account.
    pub fn register(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        identity_id: u64,
        eligible: bool,
        access: &AccessRegistry,
    ) -> Result<(), ClaimError> {
        access.require(caller, Capability::SetEligibility)?;
        if self.records.contains_key(&account) {
            return Err(ClaimError::AlreadyRegistered(account.to_string()));
        }
        info!(%caller, %account, identity_id, eligible, "beneficiary registered");
        self.records.insert(
            account.clone(),
            EligibilityRecord {
                account,
                identity_id,
                eligible,
                last_claim: Sequence::EPOCH,
            },
        );
        Ok(())
    }

    /// Flip the eligibility flag. Admin capability.
    pub fn set_eligible(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        eligible: bool,
        access: &AccessRegistry,
    ) -> Result<(), ClaimError> {
        access.require(caller, Capability::SetEligibility)?;
        let record = self
            .records
            .get_mut(account)
            .ok_or_else(|| ClaimError::NotFound(account.to_string()))?;
        record.eligible = eligible;
        info!(%caller, %account, eligible, "eligibility updated");
        Ok(())
    }

    /// Stamp a successful claim. Infallible once the record exists; called
    /// by the claim processor after the ledger credit has committed.
    pub(crate) fn record_claim(&mut self, account: &AccountId, now: Sequence) {
        if let Some(record) = self.records.get_mut(account) {
            record.last_claim = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> AccountId {
        AccountId::new(format!("rlf_{s}"))
    }

    fn setup() -> (EligibilityStore, AccessRegistry) {
        let mut access = AccessRegistry::new(acct("owner"));
        access.promote_admin(acct("admin"));
        (EligibilityStore::new(), access)
    }

    #[test]
    fn register_creates_record_with_epoch_stamp() {
        let (mut store, access) = setup();
        store
            .register(&acct("admin"), acct("ben"), 7, true, &access)
            .unwrap();
        let record = store.get(&acct("ben")).unwrap();
        assert_eq!(record.identity_id, 7);
        assert!(record.eligible);
        assert_eq!(record.last_claim, Sequence::EPOCH);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let (mut store, access) = setup();
        store
            .register(&acct("admin"), acct("ben"), 7, true, &access)
            .unwrap();
        let result = store.register(&acct("admin"), acct("ben"), 8, false, &access);
        assert!(matches!(result, Err(ClaimError::AlreadyRegistered(_))));
        assert_eq!(store.get(&acct("ben")).unwrap().identity_id, 7);
    }

    #[test]
    fn registration_requires_admin() {
        let (mut store, access) = setup();
        let result = store.register(&acct("ben"), acct("ben"), 7, true, &access);
        assert!(matches!(result, Err(ClaimError::Access(_))));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn set_eligible_flips_flag() {
        let (mut store, access) = setup();
        store
            .register(&acct("admin"), acct("ben"), 7, true, &access)
            .unwrap();
        store
            .set_eligible(&acct("admin"), &acct("ben"), false, &access)
            .unwrap();
        assert!(!store.get(&acct("ben")).unwrap().eligible);

        let missing = store.set_eligible(&acct("admin"), &acct("ghost"), true, &access);
        assert!(matches!(missing, Err(ClaimError::NotFound(_))));
    }
}
