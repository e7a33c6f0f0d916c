//! Governance proposals.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use relief_types::{AccountId, Sequence};

use crate::action::ProposalAction;

/// A governance proposal.
///
/// Open on creation; mutated by votes while `executed == false`;
/// `executed == true` is terminal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    pub proposer: AccountId,
    pub description: String,
    /// The effect applied through the hook when this proposal executes.
    pub action: ProposalAction,
    pub votes_for: u32,
    pub votes_against: u32,
    /// Accounts that have voted, kept to reject repeat votes.
    pub voters: HashSet<AccountId>,
    pub executed: bool,
    pub created_at: Sequence,
}
