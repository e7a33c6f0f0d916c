//! The balance store and its gated operations.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use relief_access::{AccessRegistry, Capability};
use relief_types::{AccountId, Amount, BatchReport};

use crate::error::LedgerError;

/// Capped-supply fungible balance store with pause and blacklist gates.
///
/// Unknown accounts implicitly hold zero; entries that reach zero are removed
/// so the map only carries actual holders. `sum(balances) == total_supply`
/// and `total_supply <= max_supply` hold after every operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    balances: HashMap<AccountId, Amount>,
    total_supply: Amount,
    max_supply: Amount,
    paused: bool,
    blacklist: HashSet<AccountId>,
}

impl TokenLedger {
    pub fn new(max_supply: Amount) -> Self {
        Self {
            balances: HashMap::new(),
            total_supply: Amount::ZERO,
            max_supply,
            paused: false,
            blacklist: HashSet::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn max_supply(&self) -> Amount {
        self.max_supply
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_blacklisted(&self, account: &AccountId) -> bool {
        self.blacklist.contains(account)
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, Amount)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }

    pub fn blacklisted(&self) -> impl Iterator<Item = &AccountId> {
        self.blacklist.iter()
    }

    /// Whether `sum(balances) == total_supply <= max_supply` — the invariant
    /// the property suite asserts after every step.
    pub fn conservation_holds(&self) -> bool {
        let mut sum = Amount::ZERO;
        for balance in self.balances.values() {
            sum = match sum.checked_add(*balance) {
                Some(s) => s,
                None => return false,
            };
        }
        sum == self.total_supply && self.total_supply <= self.max_supply
    }

    // ── Transfers ────────────────────────────────────────────────────────

    /// Move `amount` from `sender` to `recipient`. Only the holder may move
    /// their own funds — there are no delegated allowances.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        if caller != sender {
            return Err(LedgerError::NotAuthorized {
                caller: caller.to_string(),
                holder: sender.to_string(),
            });
        }
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        self.require_not_blacklisted(sender)?;
        self.require_not_blacklisted(recipient)?;
        self.move_balance(sender, recipient, amount)?;
        debug!(%sender, %recipient, %amount, "transfer settled");
        Ok(())
    }

    /// Create `amount` new supply for `recipient`. Admin capability.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        access: &AccessRegistry,
    ) -> Result<(), LedgerError> {
        access.require(caller, Capability::Mint)?;
        if self.paused {
            return Err(LedgerError::Paused);
        }
        self.credit_supply(recipient, amount)?;
        info!(%caller, %recipient, %amount, supply = %self.total_supply, "minted");
        Ok(())
    }

    /// Destroy `amount` of the caller's own balance. Self-authorized.
    pub fn burn(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        holder: &AccountId,
    ) -> Result<(), LedgerError> {
        if caller != holder {
            return Err(LedgerError::NotAuthorized {
                caller: caller.to_string(),
                holder: holder.to_string(),
            });
        }
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        self.debit(holder, amount)?;
        self.total_supply = self.total_supply.saturating_sub(amount);
        info!(%holder, %amount, supply = %self.total_supply, "burned");
        Ok(())
    }

    // ── System funding paths ─────────────────────────────────────────────
    // Used by claim processing, which authorizes through the eligibility
    // record rather than a role. Pause, blacklist, and supply gates still
    // apply.

    /// Mint `amount` directly to a claimant.
    pub fn grant(&mut self, recipient: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        self.credit_supply(recipient, amount)?;
        debug!(%recipient, %amount, "claim granted from new supply");
        Ok(())
    }

    /// Move `amount` from a pooled treasury balance to a claimant.
    pub fn disburse(
        &mut self,
        source: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        self.require_not_blacklisted(source)?;
        self.require_not_blacklisted(recipient)?;
        self.move_balance(source, recipient, amount)?;
        debug!(%source, %recipient, %amount, "claim disbursed from treasury");
        Ok(())
    }

    // ── Gates ────────────────────────────────────────────────────────────

    /// Pause or unpause the ledger. Pausing blocks transfer, mint, and burn
    /// entirely.
    pub fn set_paused(
        &mut self,
        caller: &AccountId,
        flag: bool,
        access: &AccessRegistry,
    ) -> Result<(), LedgerError> {
        access.require(caller, Capability::Pause)?;
        self.paused = flag;
        info!(%caller, paused = flag, "ledger pause flag set");
        Ok(())
    }

    /// Add or remove an account from the blacklist. Does not reverse past
    /// transfers; it only blocks future participation.
    pub fn set_blacklisted(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        flag: bool,
        access: &AccessRegistry,
    ) -> Result<(), LedgerError> {
        access.require(caller, Capability::ManageBlacklist)?;
        if flag {
            self.blacklist.insert(account.clone());
        } else {
            self.blacklist.remove(account);
        }
        info!(%caller, %account, blacklisted = flag, "blacklist updated");
        Ok(())
    }

    // ── Batches ──────────────────────────────────────────────────────────

    /// Mint to up to `max` recipients in one call.
    ///
    /// Caller authorization and the size bound reject the whole call before
    /// any element runs; after that the entries fold left-to-right and stop
    /// at the first failure without rolling back prior mints.
    pub fn mint_batch(
        &mut self,
        caller: &AccountId,
        entries: &[(AccountId, Amount)],
        max: usize,
        access: &AccessRegistry,
    ) -> Result<BatchReport<LedgerError>, LedgerError> {
        access.require(caller, Capability::Mint)?;
        if entries.len() > max {
            return Err(LedgerError::BatchLimitExceeded {
                len: entries.len(),
                max,
            });
        }
        let mut applied = 0u32;
        for (recipient, amount) in entries {
            if self.paused {
                return Ok(BatchReport::halted_at(applied, LedgerError::Paused));
            }
            if let Err(e) = self.credit_supply(recipient, *amount) {
                return Ok(BatchReport::halted_at(applied, e));
            }
            applied += 1;
        }
        info!(%caller, applied, "batch mint complete");
        Ok(BatchReport::complete(applied))
    }

    /// Set the blacklist flag for up to `max` accounts in one call.
    pub fn blacklist_batch(
        &mut self,
        caller: &AccountId,
        accounts: &[AccountId],
        flag: bool,
        max: usize,
        access: &AccessRegistry,
    ) -> Result<BatchReport<LedgerError>, LedgerError> {
        access.require(caller, Capability::ManageBlacklist)?;
        if accounts.len() > max {
            return Err(LedgerError::BatchLimitExceeded {
                len: accounts.len(),
                max,
            });
        }
        let mut applied = 0u32;
        for account in accounts {
            if flag {
                self.blacklist.insert(account.clone());
            } else {
                self.blacklist.remove(account);
            }
            applied += 1;
        }
        info!(%caller, applied, blacklisted = flag, "batch blacklist complete");
        Ok(BatchReport::complete(applied))
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_not_blacklisted(&self, account: &AccountId) -> Result<(), LedgerError> {
        if self.blacklist.contains(account) {
            return Err(LedgerError::Blacklisted(account.to_string()));
        }
        Ok(())
    }

    /// Validate and apply a supply-increasing credit. Shared by mint paths.
    fn credit_supply(&mut self, recipient: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if new_supply > self.max_supply {
            return Err(LedgerError::SupplyCapExceeded {
                requested: amount.raw(),
                supply: self.total_supply.raw(),
                cap: self.max_supply.raw(),
            });
        }
        self.require_not_blacklisted(recipient)?;
        self.credit(recipient, amount)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Atomic debit + credit. The debit is the only fallible step, so a
    /// failure leaves both balances untouched.
    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.debit(from, amount)?;
        self.credit(to, amount)
            .expect("credit after successful debit cannot overflow the supply");
        Ok(())
    }

    fn debit(&mut self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        if remaining.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), remaining);
        }
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(account);
        let updated = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balances.insert(account.clone(), updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> AccountId {
        AccountId::new(format!("rlf_{s}"))
    }

    fn setup() -> (TokenLedger, AccessRegistry) {
        let access = AccessRegistry::new(acct("owner"));
        (TokenLedger::new(Amount::new(10_000)), access)
    }

    fn funded(balance: u128) -> (TokenLedger, AccessRegistry) {
        let (mut ledger, access) = setup();
        ledger
            .mint(&acct("owner"), Amount::new(balance), &acct("alice"), &access)
            .unwrap();
        (ledger, access)
    }

    #[test]
    fn transfer_moves_funds() {
        let (mut ledger, _) = funded(1000);
        ledger
            .transfer(&acct("alice"), Amount::new(400), &acct("alice"), &acct("bob"))
            .unwrap();
        assert_eq!(ledger.balance_of(&acct("alice")), Amount::new(600));
        assert_eq!(ledger.balance_of(&acct("bob")), Amount::new(400));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn transfer_requires_caller_to_be_sender() {
        let (mut ledger, _) = funded(1000);
        let result = ledger.transfer(
            &acct("mallory"),
            Amount::new(400),
            &acct("alice"),
            &acct("mallory"),
        );
        assert!(matches!(result, Err(LedgerError::NotAuthorized { .. })));
        assert_eq!(ledger.balance_of(&acct("alice")), Amount::new(1000));
    }

    #[test]
    fn transfer_rejects_zero_amount() {
        let (mut ledger, _) = funded(1000);
        let result = ledger.transfer(&acct("alice"), Amount::ZERO, &acct("alice"), &acct("bob"));
        assert!(matches!(result, Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn transfer_insufficient_balance_reports_both_sides() {
        let (mut ledger, _) = funded(100);
        let result = ledger.transfer(
            &acct("alice"),
            Amount::new(250),
            &acct("alice"),
            &acct("bob"),
        );
        match result.unwrap_err() {
            LedgerError::InsufficientBalance { needed, available } => {
                assert_eq!(needed, 250);
                assert_eq!(available, 100);
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
        assert_eq!(ledger.balance_of(&acct("bob")), Amount::ZERO);
    }

    #[test]
    fn mint_requires_admin() {
        let (mut ledger, access) = setup();
        let result = ledger.mint(&acct("rando"), Amount::new(10), &acct("rando"), &access);
        assert!(matches!(result, Err(LedgerError::Access(_))));
        assert_eq!(ledger.total_supply(), Amount::ZERO);
    }

    #[test]
    fn mint_respects_supply_cap() {
        let (mut ledger, access) = setup();
        ledger
            .mint(&acct("owner"), Amount::new(9_999), &acct("alice"), &access)
            .unwrap();
        let result = ledger.mint(&acct("owner"), Amount::new(2), &acct("alice"), &access);
        assert!(matches!(result, Err(LedgerError::SupplyCapExceeded { .. })));
        assert_eq!(ledger.total_supply(), Amount::new(9_999));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn burn_shrinks_supply() {
        let (mut ledger, _) = funded(1000);
        ledger
            .burn(&acct("alice"), Amount::new(300), &acct("alice"))
            .unwrap();
        assert_eq!(ledger.balance_of(&acct("alice")), Amount::new(700));
        assert_eq!(ledger.total_supply(), Amount::new(700));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn burn_is_self_authorized_only() {
        let (mut ledger, _) = funded(1000);
        let result = ledger.burn(&acct("owner"), Amount::new(300), &acct("alice"));
        assert!(matches!(result, Err(LedgerError::NotAuthorized { .. })));
    }

    #[test]
    fn pause_blocks_transfer_mint_and_burn() {
        let (mut ledger, access) = funded(1000);
        ledger.set_paused(&acct("owner"), true, &access).unwrap();

        let t = ledger.transfer(&acct("alice"), Amount::new(1), &acct("alice"), &acct("bob"));
        let m = ledger.mint(&acct("owner"), Amount::new(1), &acct("bob"), &access);
        let b = ledger.burn(&acct("alice"), Amount::new(1), &acct("alice"));
        assert!(matches!(t, Err(LedgerError::Paused)));
        assert!(matches!(m, Err(LedgerError::Paused)));
        assert!(matches!(b, Err(LedgerError::Paused)));

        ledger.set_paused(&acct("owner"), false, &access).unwrap();
        assert!(ledger
            .transfer(&acct("alice"), Amount::new(1), &acct("alice"), &acct("bob"))
            .is_ok());
    }

    #[test]
    fn blacklist_blocks_either_side_of_transfer() {
        let (mut ledger, access) = funded(1000);
        ledger
            .set_blacklisted(&acct("owner"), &acct("bob"), true, &access)
            .unwrap();

        let as_recipient =
            ledger.transfer(&acct("alice"), Amount::new(10), &acct("alice"), &acct("bob"));
        assert!(matches!(as_recipient, Err(LedgerError::Blacklisted(_))));

        ledger
            .set_blacklisted(&acct("owner"), &acct("alice"), true, &access)
            .unwrap();
        let as_sender =
            ledger.transfer(&acct("alice"), Amount::new(10), &acct("alice"), &acct("carol"));
        assert!(matches!(as_sender, Err(LedgerError::Blacklisted(_))));
    }

    #[test]
    fn blacklist_blocks_mint_recipient() {
        let (mut ledger, access) = setup();
        ledger
            .set_blacklisted(&acct("owner"), &acct("bob"), true, &access)
            .unwrap();
        let result = ledger.mint(&acct("owner"), Amount::new(10), &acct("bob"), &access);
        assert!(matches!(result, Err(LedgerError::Blacklisted(_))));
        assert_eq!(ledger.total_supply(), Amount::ZERO);
    }

    #[test]
    fn unblacklisting_restores_participation() {
        let (mut ledger, access) = funded(1000);
        ledger
            .set_blacklisted(&acct("owner"), &acct("bob"), true, &access)
            .unwrap();
        ledger
            .set_blacklisted(&acct("owner"), &acct("bob"), false, &access)
            .unwrap();
        assert!(ledger
            .transfer(&acct("alice"), Amount::new(10), &acct("alice"), &acct("bob"))
            .is_ok());
    }

    #[test]
    fn batch_mint_fail_fast_keeps_prior_mints() {
        let (mut ledger, access) = setup();
        ledger
            .set_blacklisted(&acct("owner"), &acct("bad"), true, &access)
            .unwrap();
        let entries = vec![
            (acct("a"), Amount::new(10)),
            (acct("b"), Amount::new(20)),
            (acct("bad"), Amount::new(30)),
            (acct("d"), Amount::new(40)),
        ];
        let report = ledger
            .mint_batch(&acct("owner"), &entries, 5, &access)
            .unwrap();
        assert_eq!(report.applied, 2);
        assert!(matches!(report.halted, Some(LedgerError::Blacklisted(_))));
        // Prior elements stay committed; the element after the failure never ran.
        assert_eq!(ledger.balance_of(&acct("a")), Amount::new(10));
        assert_eq!(ledger.balance_of(&acct("b")), Amount::new(20));
        assert_eq!(ledger.balance_of(&acct("d")), Amount::ZERO);
        assert_eq!(ledger.total_supply(), Amount::new(30));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn batch_mint_rejects_oversized_list_before_any_element() {
        let (mut ledger, access) = setup();
        let entries: Vec<_> = (0..6)
            .map(|i| (acct(&format!("r{i}")), Amount::new(1)))
            .collect();
        let result = ledger.mint_batch(&acct("owner"), &entries, 5, &access);
        assert!(matches!(
            result,
            Err(LedgerError::BatchLimitExceeded { len: 6, max: 5 })
        ));
        assert_eq!(ledger.total_supply(), Amount::ZERO);
    }

    #[test]
    fn batch_blacklist_sets_every_account() {
        let (mut ledger, access) = setup();
        let accounts = vec![acct("x"), acct("y"), acct("z")];
        let report = ledger
            .blacklist_batch(&acct("owner"), &accounts, true, 5, &access)
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(report.applied, 3);
        for a in &accounts {
            assert!(ledger.is_blacklisted(a));
        }
    }

    #[test]
    fn grant_respects_cap_and_blacklist() {
        let (mut ledger, access) = setup();
        ledger.grant(&acct("claimant"), Amount::new(50)).unwrap();
        assert_eq!(ledger.balance_of(&acct("claimant")), Amount::new(50));
        assert_eq!(ledger.total_supply(), Amount::new(50));

        ledger
            .set_blacklisted(&acct("owner"), &acct("claimant"), true, &access)
            .unwrap();
        let result = ledger.grant(&acct("claimant"), Amount::new(50));
        assert!(matches!(result, Err(LedgerError::Blacklisted(_))));

        let result = ledger.grant(&acct("other"), Amount::new(100_000));
        assert!(matches!(result, Err(LedgerError::SupplyCapExceeded { .. })));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn disburse_moves_from_treasury() {
        let (mut ledger, _) = funded(1000);
        ledger
            .disburse(&acct("alice"), &acct("claimant"), Amount::new(75))
            .unwrap();
        assert_eq!(ledger.balance_of(&acct("claimant")), Amount::new(75));
        assert_eq!(ledger.balance_of(&acct("alice")), Amount::new(925));
        assert_eq!(ledger.total_supply(), Amount::new(1000));

        let result = ledger.disburse(&acct("alice"), &acct("claimant"), Amount::new(10_000));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    }

    #[test]
    fn self_transfer_is_a_gated_noop() {
        let (mut ledger, _) = funded(500);
        ledger
            .transfer(&acct("alice"), Amount::new(100), &acct("alice"), &acct("alice"))
            .unwrap();
        assert_eq!(ledger.balance_of(&acct("alice")), Amount::new(500));
        assert!(ledger.conservation_holds());
    }
}
