//! The distribution engine.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use relief_access::{AccessRegistry, Capability};
use relief_ledger::{LedgerError, TokenLedger};
use relief_types::{AccountId, Amount, Sequence};

use crate::error::DistributionError;
use crate::record::Distribution;

/// What a `distribute` call settled.
#[derive(Debug)]
pub struct DistributionOutcome {
    /// Id of the audit record written for this call.
    pub id: u64,
    /// Recipients credited before the fold stopped.
    pub settled: u32,
    /// The transfer error that halted settlement, if any.
    pub halted: Option<LedgerError>,
}

impl DistributionOutcome {
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}

/// Applies bulk transfers from the distributor's balance and keeps the
/// append-only audit log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionEngine {
    history: Vec<Distribution>,
    /// Next id to assign. Starts at 1; ids are never reused.
    next_id: u64,
}

impl DistributionEngine {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Distribution> {
        self.history.iter().find(|d| d.id == id)
    }

    pub fn count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> impl Iterator<Item = &Distribution> {
        self.history.iter()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Distribute `amount` to each recipient from the distributor's balance.
    ///
    /// Only the designated distributor may call this. The audit record is
    /// written unconditionally once the call is admitted; settlement then
    /// folds left-to-right over the recipients and stops at the first
    /// transfer failure without reversing recipients already credited.
    pub fn distribute(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        recipients: Vec<AccountId>,
        now: Sequence,
        ledger: &mut TokenLedger,
        max_recipients: usize,
        access: &AccessRegistry,
    ) -> Result<DistributionOutcome, DistributionError> {
        access.require(caller, Capability::Distribute)?;
        if recipients.len() > max_recipients {
            return Err(DistributionError::TooManyRecipients {
                len: recipients.len(),
                max: max_recipients,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.history.push(Distribution {
            id,
            distributor: caller.clone(),
            amount,
            recipients: recipients.clone(),
            recorded_at: now,
        });

        let mut settled = 0u32;
        for recipient in &recipients {
            if let Err(e) = ledger.transfer(caller, amount, caller, recipient) {
                warn!(id, settled, error = %e, "distribution halted");
                return Ok(DistributionOutcome {
                    id,
                    settled,
                    halted: Some(e),
                });
            }
            settled += 1;
        }
        info!(id, settled, %amount, "distribution complete");
        Ok(DistributionOutcome {
            id,
            settled,
            halted: None,
        })
    }
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::new()
    }
}
