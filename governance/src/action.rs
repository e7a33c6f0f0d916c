//! Executed-proposal effects.

use serde::{Deserialize, Serialize};

use relief_types::AccountId;

/// What an executed proposal does.
///
/// The engine never applies these itself — `execute` hands the action to a
/// [`ProposalHook`] supplied by the caller, which is where role policy
/// lives. `None` makes text-only (signalling) proposals possible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// No on-ledger effect.
    None,
    /// Add an account to the admin set.
    GrantAdmin(AccountId),
    /// Remove an account from the admin set.
    RevokeAdmin(AccountId),
    /// Designate the distribution account.
    SetDistributor(AccountId),
}

/// Applies the action of a proposal that passed.
pub trait ProposalHook {
    fn apply(&mut self, action: &ProposalAction);
}

/// Hook that discards the action; for deployments that only signal.
pub struct NoopHook;

impl ProposalHook for NoopHook {
    fn apply(&mut self, _action: &ProposalAction) {}
}
