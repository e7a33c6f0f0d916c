//! The cooldown-gated claim operation.

use serde::{Deserialize, Serialize};
use tracing::info;

use relief_ledger::TokenLedger;
use relief_types::{AccountId, Amount, Sequence};

use crate::eligibility::EligibilityStore;
use crate::error::ClaimError;
use crate::funding::FundingStrategy;

/// Processes claims against the token ledger and the eligibility store.
///
/// The credit and the cooldown stamp must commit together or not at all.
/// In this single-writer design that is achieved by ordering: every
/// precondition (eligibility, cooldown, and the ledger's own gates) is
/// checked before any mutation, the ledger credit is the only fallible
/// mutation, and the stamp that follows it cannot fail. A reimplementation
/// that splits the ledger and the eligibility store across service
/// boundaries must wrap both mutations in one distributed transaction
/// instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimProcessor {
    claim_amount: Amount,
    cooldown: u64,
    funding: FundingStrategy,
}

impl ClaimProcessor {
    pub fn new(claim_amount: Amount, cooldown: u64, funding: FundingStrategy) -> Self {
        Self {
            claim_amount,
            cooldown,
            funding,
        }
    }

    pub fn claim_amount(&self) -> Amount {
        self.claim_amount
    }

    pub fn cooldown(&self) -> u64 {
        self.cooldown
    }

    pub fn funding(&self) -> &FundingStrategy {
        &self.funding
    }

    /// Process a claim by `caller` at sequence `now`.
    ///
    /// Returns the claimed amount. On any failure neither the ledger nor
    /// the eligibility record has changed.
    pub fn claim(
        &self,
        caller: &AccountId,
        now: Sequence,
        ledger: &mut TokenLedger,
        eligibility: &mut EligibilityStore,
    ) -> Result<Amount, ClaimError> {
        let record = eligibility
            .get(caller)
            .ok_or_else(|| ClaimError::NotFound(caller.to_string()))?;
        if !record.eligible {
            return Err(ClaimError::NotEligible(caller.to_string()));
        }
        if record.last_claim != Sequence::EPOCH
            && !record.last_claim.has_elapsed(self.cooldown, now)
        {
            let elapsed = record.last_claim.elapsed_since(now);
            return Err(ClaimError::CooldownActive {
                remaining: self.cooldown - elapsed,
            });
        }

        // The one fallible mutation. The ledger validates its own gates
        // (pause, blacklist, cap or treasury balance) before touching state,
        // so a failure here leaves everything untouched.
        match &self.funding {
            FundingStrategy::MintOnClaim => ledger.grant(caller, self.claim_amount)?,
            FundingStrategy::DebitTreasury { treasury } => {
                ledger.disburse(treasury, caller, self.claim_amount)?
            }
        }

        // Infallible: the record was present above and nothing removed it.
        eligibility.record_claim(caller, now);
        info!(%caller, %now, amount = %self.claim_amount, "claim settled");
        Ok(self.claim_amount)
    }
}
