//! The governance engine.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use relief_types::{AccountId, Sequence};

use crate::action::{ProposalAction, ProposalHook};
use crate::error::GovernanceError;
use crate::proposal::Proposal;

/// Keyed store of proposals with a monotonic id counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceEngine {
    proposals: BTreeMap<u64, Proposal>,
    /// Next id to assign. Starts at 1; ids are never reused.
    next_id: u64,
    min_votes: u32,
}

impl GovernanceEngine {
    pub fn new(min_votes: u32) -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
            min_votes,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn count(&self) -> usize {
        self.proposals.len()
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn min_votes(&self) -> u32 {
        self.min_votes
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Create a proposal. Open to any caller; counters start at zero.
    pub fn propose(
        &mut self,
        caller: &AccountId,
        description: String,
        action: ProposalAction,
        now: Sequence,
        description_max_len: usize,
    ) -> Result<u64, GovernanceError> {
        if description.len() > description_max_len {
            return Err(GovernanceError::DescriptionTooLong {
                len: description.len(),
                max: description_max_len,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.proposals.insert(
            id,
            Proposal {
                id,
                proposer: caller.clone(),
                description,
                action,
                votes_for: 0,
                votes_against: 0,
                voters: HashSet::new(),
                executed: false,
                created_at: now,
            },
        );
        info!(%caller, id, "proposal created");
        Ok(id)
    }

    /// Cast a vote on an open proposal. One vote per account per proposal.
    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: u64,
        in_favor: bool,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::NotFound(id))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        if proposal.voters.contains(caller) {
            return Err(GovernanceError::AlreadyVoted(caller.to_string()));
        }
        proposal.voters.insert(caller.clone());
        if in_favor {
            proposal.votes_for += 1;
        } else {
            proposal.votes_against += 1;
        }
        info!(%caller, id, in_favor, "vote recorded");
        Ok(())
    }

    /// Execute a passing proposal: flip the terminal flag and hand the
    /// action to `hook`.
    ///
    /// Requires `votes_for >= min_votes` and a strict majority. Any caller
    /// may execute; the hook is where role policy is applied.
    pub fn execute(
        &mut self,
        caller: &AccountId,
        id: u64,
        hook: &mut dyn ProposalHook,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::NotFound(id))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        if proposal.votes_for < self.min_votes || proposal.votes_for <= proposal.votes_against {
            return Err(GovernanceError::ThresholdNotMet {
                votes_for: proposal.votes_for,
                votes_against: proposal.votes_against,
                min_votes: self.min_votes,
            });
        }
        proposal.executed = true;
        let action = proposal.action.clone();
        info!(%caller, id, ?action, "proposal executed");
        hook.apply(&action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NoopHook;

    fn acct(s: &str) -> AccountId {
        AccountId::new(format!("rlf_{s}"))
    }

    fn engine() -> GovernanceEngine {
        GovernanceEngine::new(3)
    }

    fn proposed(engine: &mut GovernanceEngine) -> u64 {
        engine
            .propose(
                &acct("alice"),
                "expand camp 7 rations".into(),
                ProposalAction::None,
                Sequence::new(1),
                512,
            )
            .unwrap()
    }

    fn cast_votes(engine: &mut GovernanceEngine, id: u64, favor: u32, against: u32) {
        for i in 0..favor {
            engine.vote(&acct(&format!("yes{i}")), id, true).unwrap();
        }
        for i in 0..against {
            engine.vote(&acct(&format!("no{i}")), id, false).unwrap();
        }
    }

    #[test]
    fn propose_assigns_monotonic_ids_and_zero_counters() {
        let mut engine = engine();
        let a = proposed(&mut engine);
        let b = proposed(&mut engine);
        assert_eq!((a, b), (1, 2));
        let p = engine.get(a).unwrap();
        assert_eq!(p.votes_for, 0);
        assert_eq!(p.votes_against, 0);
        assert!(!p.executed);
    }

    #[test]
    fn description_bound_enforced() {
        let mut engine = engine();
        let result = engine.propose(
            &acct("alice"),
            "x".repeat(600),
            ProposalAction::None,
            Sequence::new(1),
            512,
        );
        assert!(matches!(
            result,
            Err(GovernanceError::DescriptionTooLong { len: 600, max: 512 })
        ));
    }

    #[test]
    fn votes_accumulate() {
        let mut engine = engine();
        let id = proposed(&mut engine);
        cast_votes(&mut engine, id, 2, 1);
        let p = engine.get(id).unwrap();
        assert_eq!(p.votes_for, 2);
        assert_eq!(p.votes_against, 1);
    }

    #[test]
    fn repeat_vote_rejected() {
        let mut engine = engine();
        let id = proposed(&mut engine);
        engine.vote(&acct("bob"), id, true).unwrap();
        let again = engine.vote(&acct("bob"), id, false).unwrap_err();
        assert!(matches!(again, GovernanceError::AlreadyVoted(_)));
        let p = engine.get(id).unwrap();
        assert_eq!(p.votes_for, 1);
        assert_eq!(p.votes_against, 0);
    }

    #[test]
    fn vote_on_missing_or_executed_proposal_fails() {
        let mut engine = engine();
        assert!(matches!(
            engine.vote(&acct("bob"), 99, true),
            Err(GovernanceError::NotFound(99))
        ));

        let id = proposed(&mut engine);
        cast_votes(&mut engine, id, 3, 0);
        engine.execute(&acct("bob"), id, &mut NoopHook).unwrap();
        assert!(matches!(
            engine.vote(&acct("late"), id, true),
            Err(GovernanceError::AlreadyExecuted(_))
        ));
    }

    #[test]
    fn execute_requires_min_votes_and_majority() {
        let mut engine = engine();
        let id = proposed(&mut engine);
        cast_votes(&mut engine, id, 2, 0);
        // Below min_votes.
        assert!(matches!(
            engine.execute(&acct("x"), id, &mut NoopHook),
            Err(GovernanceError::ThresholdNotMet { .. })
        ));

        let tied = proposed(&mut engine);
        cast_votes(&mut engine, tied, 3, 3);
        // Meets min_votes but not a strict majority.
        assert!(matches!(
            engine.execute(&acct("x"), tied, &mut NoopHook),
            Err(GovernanceError::ThresholdNotMet { .. })
        ));
    }

    #[test]
    fn execute_is_terminal() {
        let mut engine = engine();
        let id = proposed(&mut engine);
        cast_votes(&mut engine, id, 4, 1);
        engine.execute(&acct("x"), id, &mut NoopHook).unwrap();
        assert!(engine.get(id).unwrap().executed);

        let second = engine.execute(&acct("x"), id, &mut NoopHook);
        assert!(matches!(second, Err(GovernanceError::AlreadyExecuted(_))));
    }

    #[test]
    fn execute_hands_action_to_hook() {
        struct Capture(Option<ProposalAction>);
        impl ProposalHook for Capture {
            fn apply(&mut self, action: &ProposalAction) {
                self.0 = Some(action.clone());
            }
        }

        let mut engine = engine();
        let id = engine
            .propose(
                &acct("alice"),
                "appoint a new admin".into(),
                ProposalAction::GrantAdmin(acct("carol")),
                Sequence::new(1),
                512,
            )
            .unwrap();
        cast_votes(&mut engine, id, 3, 0);

        let mut hook = Capture(None);
        engine.execute(&acct("x"), id, &mut hook).unwrap();
        assert_eq!(hook.0, Some(ProposalAction::GrantAdmin(acct("carol"))));
    }

    #[test]
    fn failed_execute_leaves_proposal_open() {
        struct Panic;
        impl ProposalHook for Panic {
            fn apply(&mut self, _action: &ProposalAction) {
                panic!("hook must not run for a failing execute");
            }
        }

        let mut engine = engine();
        let id = proposed(&mut engine);
        cast_votes(&mut engine, id, 1, 2);
        let result = engine.execute(&acct("x"), id, &mut Panic);
        assert!(result.is_err());
        assert!(!engine.get(id).unwrap().executed);
    }
}
