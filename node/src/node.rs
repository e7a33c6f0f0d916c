//! The single-writer orchestrator.

use serde::{Deserialize, Serialize};
use tracing::debug;

use relief_access::AccessRegistry;
use relief_claims::{ClaimProcessor, EligibilityStore};
use relief_distribution::{DistributionEngine, DistributionOutcome};
use relief_governance::{GovernanceEngine, ProposalAction, ProposalHook};
use relief_identity::{IdentityDetails, IdentityError, IdentityRegistry};
use relief_ledger::{LedgerError, TokenLedger};
use relief_types::{
    AccountId, Amount, BatchReport, ContentHash, PrivacyLevel, ProtocolParams, Sequence,
};

use crate::error::NodeError;
use crate::genesis::Genesis;

/// Owns every component and serializes all mutation through `&mut self`.
///
/// Operations are admitted against the node's logical clock and then run to
/// completion; cross-component operations (claims, distributions) stay
/// in-process, so their atomicity follows from the single-writer model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReliefNode {
    params: ProtocolParams,
    clock: Sequence,
    access: AccessRegistry,
    ledger: TokenLedger,
    identities: IdentityRegistry,
    eligibility: EligibilityStore,
    claims: ClaimProcessor,
    distribution: DistributionEngine,
    governance: GovernanceEngine,
}

/// Applies executed-proposal actions to the role registry.
struct AccessHook<'a> {
    access: &'a mut AccessRegistry,
}

impl ProposalHook for AccessHook<'_> {
    fn apply(&mut self, action: &ProposalAction) {
        match action {
            ProposalAction::None => {}
            ProposalAction::GrantAdmin(account) => self.access.promote_admin(account.clone()),
            ProposalAction::RevokeAdmin(account) => self.access.demote_admin(account),
            ProposalAction::SetDistributor(account) => {
                self.access.designate_distributor(account.clone())
            }
        }
    }
}

impl ReliefNode {
    pub fn new(genesis: Genesis) -> Self {
        let mut access = AccessRegistry::new(genesis.owner);
        for admin in genesis.admins {
            access.promote_admin(admin);
        }
        if let Some(distributor) = genesis.distributor {
            access.designate_distributor(distributor);
        }
        let params = genesis.params;
        Self {
            clock: Sequence::EPOCH,
            access,
            ledger: TokenLedger::new(Amount::new(params.max_supply)),
            identities: IdentityRegistry::new(),
            eligibility: EligibilityStore::new(),
            claims: ClaimProcessor::new(
                Amount::new(params.claim_amount),
                params.claim_cooldown,
                genesis.funding,
            ),
            distribution: DistributionEngine::new(),
            governance: GovernanceEngine::new(params.governance_min_votes),
            params,
        }
    }

    // ── Component views ──────────────────────────────────────────────────

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn clock(&self) -> Sequence {
        self.clock
    }

    pub fn access(&self) -> &AccessRegistry {
        &self.access
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    pub fn eligibility(&self) -> &EligibilityStore {
        &self.eligibility
    }

    pub fn claims(&self) -> &ClaimProcessor {
        &self.claims
    }

    pub fn distributions(&self) -> &DistributionEngine {
        &self.distribution
    }

    pub fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }

    /// Admit an operation at `now`: the clock may stand still or move
    /// forward, never backwards.
    fn admit(&mut self, now: Sequence) -> Result<(), NodeError> {
        if now < self.clock {
            return Err(NodeError::ClockRegression {
                now: now.value(),
                clock: self.clock.value(),
            });
        }
        self.clock = now;
        debug!(%now, "operation admitted");
        Ok(())
    }

    // ── Token ledger ─────────────────────────────────────────────────────

    pub fn transfer(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.ledger.transfer(caller, amount, sender, recipient)?;
        Ok(())
    }

    pub fn mint(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        amount: Amount,
        recipient: &AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.ledger.mint(caller, amount, recipient, &self.access)?;
        Ok(())
    }

    pub fn burn(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        amount: Amount,
        holder: &AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.ledger.burn(caller, amount, holder)?;
        Ok(())
    }

    pub fn set_paused(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        flag: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.ledger.set_paused(caller, flag, &self.access)?;
        Ok(())
    }

    pub fn set_blacklisted(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: &AccountId,
        flag: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.ledger
            .set_blacklisted(caller, account, flag, &self.access)?;
        Ok(())
    }

    pub fn mint_batch(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        entries: &[(AccountId, Amount)],
    ) -> Result<BatchReport<LedgerError>, NodeError> {
        self.admit(now)?;
        let report =
            self.ledger
                .mint_batch(caller, entries, self.params.max_batch_mint, &self.access)?;
        Ok(report)
    }

    pub fn blacklist_batch(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        accounts: &[AccountId],
        flag: bool,
    ) -> Result<BatchReport<LedgerError>, NodeError> {
        self.admit(now)?;
        let report = self.ledger.blacklist_batch(
            caller,
            accounts,
            flag,
            self.params.max_batch_blacklist,
            &self.access,
        )?;
        Ok(report)
    }

    // ── Identity registry ────────────────────────────────────────────────

    pub fn mint_identity(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        content_hash: ContentHash,
        metadata: String,
        privacy_level: PrivacyLevel,
    ) -> Result<u64, NodeError> {
        self.admit(now)?;
        let id = self.identities.mint(
            caller,
            content_hash,
            metadata,
            privacy_level,
            self.params.metadata_max_len,
        )?;
        Ok(id)
    }

    pub fn verify_identity(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities.verify(caller, id, now, &self.access)?;
        Ok(())
    }

    pub fn update_identity_metadata(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
        metadata: String,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities
            .update_metadata(caller, id, metadata, self.params.metadata_max_len)?;
        Ok(())
    }

    pub fn set_privacy_level(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
        level: PrivacyLevel,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities.set_privacy_level(caller, id, level)?;
        Ok(())
    }

    pub fn revoke_identity(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities.revoke(caller, id, &self.access)?;
        Ok(())
    }

    pub fn transfer_identity(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
        recipient: &AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities.transfer(caller, id, recipient)?;
        Ok(())
    }

    pub fn identity_details(
        &self,
        caller: &AccountId,
        id: u64,
    ) -> Result<IdentityDetails, NodeError> {
        let details = self.identities.details(caller, id, &self.access)?;
        Ok(details)
    }

    pub fn verify_identity_batch(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        ids: &[u64],
    ) -> Result<BatchReport<IdentityError>, NodeError> {
        self.admit(now)?;
        let report = self.identities.verify_batch(
            caller,
            ids,
            now,
            self.params.max_batch_verify,
            &self.access,
        )?;
        Ok(report)
    }

    pub fn set_identity_paused(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        flag: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.identities.set_paused(caller, flag, &self.access)?;
        Ok(())
    }

    // ── Eligibility & claims ─────────────────────────────────────────────

    pub fn register_beneficiary(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: AccountId,
        identity_id: u64,
        eligible: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.eligibility
            .register(caller, account, identity_id, eligible, &self.access)?;
        Ok(())
    }

    pub fn set_eligible(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: &AccountId,
        eligible: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.eligibility
            .set_eligible(caller, account, eligible, &self.access)?;
        Ok(())
    }

    /// The one cross-component operation: validates eligibility and
    /// cooldown, then credits the ledger and stamps the record as a single
    /// logical transaction.
    pub fn claim(&mut self, caller: &AccountId, now: Sequence) -> Result<Amount, NodeError> {
        self.admit(now)?;
        let claimed = self
            .claims
            .claim(caller, now, &mut self.ledger, &mut self.eligibility)?;
        Ok(claimed)
    }

    // ── Distribution ─────────────────────────────────────────────────────

    pub fn distribute(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        amount: Amount,
        recipients: Vec<AccountId>,
    ) -> Result<DistributionOutcome, NodeError> {
        self.admit(now)?;
        let outcome = self.distribution.distribute(
            caller,
            amount,
            recipients,
            now,
            &mut self.ledger,
            self.params.max_distribution_recipients,
            &self.access,
        )?;
        Ok(outcome)
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub fn propose(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        description: String,
        action: ProposalAction,
    ) -> Result<u64, NodeError> {
        self.admit(now)?;
        let id = self.governance.propose(
            caller,
            description,
            action,
            now,
            self.params.description_max_len,
        )?;
        Ok(id)
    }

    pub fn vote(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        id: u64,
        in_favor: bool,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.governance.vote(caller, id, in_favor)?;
        Ok(())
    }

    /// Execute a passing proposal. The node's hook applies role actions to
    /// the access registry.
    pub fn execute(&mut self, caller: &AccountId, now: Sequence, id: u64) -> Result<(), NodeError> {
        self.admit(now)?;
        let mut hook = AccessHook {
            access: &mut self.access,
        };
        self.governance.execute(caller, id, &mut hook)?;
        Ok(())
    }

    // ── Role administration ──────────────────────────────────────────────

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        new_owner: AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.access.transfer_ownership(caller, new_owner)?;
        Ok(())
    }

    pub fn add_admin(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.access.add_admin(caller, account)?;
        Ok(())
    }

    pub fn remove_admin(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: &AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.access.remove_admin(caller, account)?;
        Ok(())
    }

    pub fn set_distributor(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        account: AccountId,
    ) -> Result<(), NodeError> {
        self.admit(now)?;
        self.access.set_distributor(caller, account)?;
        Ok(())
    }
}
