//! The request/response boundary.
//!
//! Every public operation is a `(operation, typed arguments, caller)` triple
//! answered with a [`Result<Output, NodeError>`]. The enum exists for
//! environments that deliver operations as data (a transaction log, a test
//! harness); library callers can use the typed methods on
//! [`ReliefNode`](crate::ReliefNode) directly.

use serde::{Deserialize, Serialize};

use relief_distribution::DistributionOutcome;
use relief_governance::ProposalAction;
use relief_identity::IdentityDetails;
use relief_types::{AccountId, Amount, BatchReport, ContentHash, PrivacyLevel, Sequence};

use crate::error::NodeError;
use crate::node::ReliefNode;

/// A caller-initiated operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Operation {
    // Token ledger
    Transfer {
        amount: Amount,
        sender: AccountId,
        recipient: AccountId,
    },
    Mint {
        amount: Amount,
        recipient: AccountId,
    },
    Burn {
        amount: Amount,
        holder: AccountId,
    },
    SetPaused {
        flag: bool,
    },
    SetBlacklisted {
        account: AccountId,
        flag: bool,
    },
    MintBatch {
        entries: Vec<(AccountId, Amount)>,
    },
    BlacklistBatch {
        accounts: Vec<AccountId>,
        flag: bool,
    },

    // Identity registry
    MintIdentity {
        content_hash: ContentHash,
        metadata: String,
        privacy_level: u8,
    },
    VerifyIdentity {
        id: u64,
    },
    UpdateIdentityMetadata {
        id: u64,
        metadata: String,
    },
    SetPrivacyLevel {
        id: u64,
        level: u8,
    },
    RevokeIdentity {
        id: u64,
    },
    TransferIdentity {
        id: u64,
        recipient: AccountId,
    },
    IdentityDetails {
        id: u64,
    },
    VerifyIdentityBatch {
        ids: Vec<u64>,
    },
    SetIdentityPaused {
        flag: bool,
    },

    // Eligibility & claims
    RegisterBeneficiary {
        account: AccountId,
        identity_id: u64,
        eligible: bool,
    },
    SetEligible {
        account: AccountId,
        eligible: bool,
    },
    Claim,

    // Distribution
    Distribute {
        amount: Amount,
        recipients: Vec<AccountId>,
    },

    // Governance
    Propose {
        description: String,
        action: ProposalAction,
    },
    Vote {
        id: u64,
        in_favor: bool,
    },
    Execute {
        id: u64,
    },

    // Role administration
    TransferOwnership {
        new_owner: AccountId,
    },
    AddAdmin {
        account: AccountId,
    },
    RemoveAdmin {
        account: AccountId,
    },
    SetDistributor {
        account: AccountId,
    },
}

/// What a successful operation returns.
#[derive(Debug)]
pub enum Output {
    /// Operations whose success value is just acknowledgement.
    Done,
    /// A newly assigned id (identity mint, proposal creation).
    Id(u64),
    /// The claimed amount.
    Claimed(Amount),
    /// Fold outcome of a bounded batch.
    Batch(BatchReport<NodeError>),
    /// Settlement outcome of a distribution call.
    Distribution(DistributionOutcome),
    /// A privacy-gated identity view.
    Details(IdentityDetails),
}

impl ReliefNode {
    /// Dispatch one operation at sequence `now` on behalf of `caller`.
    pub fn apply(
        &mut self,
        caller: &AccountId,
        now: Sequence,
        op: Operation,
    ) -> Result<Output, NodeError> {
        match op {
            Operation::Transfer {
                amount,
                sender,
                recipient,
            } => {
                self.transfer(caller, now, amount, &sender, &recipient)?;
                Ok(Output::Done)
            }
            Operation::Mint { amount, recipient } => {
                self.mint(caller, now, amount, &recipient)?;
                Ok(Output::Done)
            }
            Operation::Burn { amount, holder } => {
                self.burn(caller, now, amount, &holder)?;
                Ok(Output::Done)
            }
            Operation::SetPaused { flag } => {
                self.set_paused(caller, now, flag)?;
                Ok(Output::Done)
            }
            Operation::SetBlacklisted { account, flag } => {
                self.set_blacklisted(caller, now, &account, flag)?;
                Ok(Output::Done)
            }
            Operation::MintBatch { entries } => {
                let report = self.mint_batch(caller, now, &entries)?;
                Ok(Output::Batch(BatchReport {
                    applied: report.applied,
                    halted: report.halted.map(NodeError::from),
                }))
            }
            Operation::BlacklistBatch { accounts, flag } => {
                let report = self.blacklist_batch(caller, now, &accounts, flag)?;
                Ok(Output::Batch(BatchReport {
                    applied: report.applied,
                    halted: report.halted.map(NodeError::from),
                }))
            }
            Operation::MintIdentity {
                content_hash,
                metadata,
                privacy_level,
            } => {
                let level = PrivacyLevel::from_u8(privacy_level)
                    .ok_or(NodeError::InvalidPrivacyLevel(privacy_level))?;
                let id = self.mint_identity(caller, now, content_hash, metadata, level)?;
                Ok(Output::Id(id))
            }
            Operation::VerifyIdentity { id } => {
                self.verify_identity(caller, now, id)?;
                Ok(Output::Done)
            }
            Operation::UpdateIdentityMetadata { id, metadata } => {
                self.update_identity_metadata(caller, now, id, metadata)?;
                Ok(Output::Done)
            }
            Operation::SetPrivacyLevel { id, level } => {
                let level =
                    PrivacyLevel::from_u8(level).ok_or(NodeError::InvalidPrivacyLevel(level))?;
                self.set_privacy_level(caller, now, id, level)?;
                Ok(Output::Done)
            }
            Operation::RevokeIdentity { id } => {
                self.revoke_identity(caller, now, id)?;
                Ok(Output::Done)
            }
            Operation::TransferIdentity { id, recipient } => {
                self.transfer_identity(caller, now, id, &recipient)?;
                Ok(Output::Done)
            }
            Operation::IdentityDetails { id } => {
                let details = self.identity_details(caller, id)?;
                Ok(Output::Details(details))
            }
            Operation::VerifyIdentityBatch { ids } => {
                let report = self.verify_identity_batch(caller, now, &ids)?;
                Ok(Output::Batch(BatchReport {
                    applied: report.applied,
                    halted: report.halted.map(NodeError::from),
                }))
            }
            Operation::SetIdentityPaused { flag } => {
                self.set_identity_paused(caller, now, flag)?;
                Ok(Output::Done)
            }
            Operation::RegisterBeneficiary {
                account,
                identity_id,
                eligible,
            } => {
                self.register_beneficiary(caller, now, account, identity_id, eligible)?;
                Ok(Output::Done)
            }
            Operation::SetEligible { account, eligible } => {
                self.set_eligible(caller, now, &account, eligible)?;
                Ok(Output::Done)
            }
            Operation::Claim => {
                let claimed = self.claim(caller, now)?;
                Ok(Output::Claimed(claimed))
            }
            Operation::Distribute { amount, recipients } => {
                let outcome = self.distribute(caller, now, amount, recipients)?;
                Ok(Output::Distribution(outcome))
            }
            Operation::Propose {
                description,
                action,
            } => {
                let id = self.propose(caller, now, description, action)?;
                Ok(Output::Id(id))
            }
            Operation::Vote { id, in_favor } => {
                self.vote(caller, now, id, in_favor)?;
                Ok(Output::Done)
            }
            Operation::Execute { id } => {
                self.execute(caller, now, id)?;
                Ok(Output::Done)
            }
            Operation::TransferOwnership { new_owner } => {
                self.transfer_ownership(caller, now, new_owner)?;
                Ok(Output::Done)
            }
            Operation::AddAdmin { account } => {
                self.add_admin(caller, now, account)?;
                Ok(Output::Done)
            }
            Operation::RemoveAdmin { account } => {
                self.remove_admin(caller, now, &account)?;
                Ok(Output::Done)
            }
            Operation::SetDistributor { account } => {
                self.set_distributor(caller, now, account)?;
                Ok(Output::Done)
            }
        }
    }
}
