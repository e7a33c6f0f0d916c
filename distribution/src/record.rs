//! The append-only distribution audit record.

use serde::{Deserialize, Serialize};

use relief_types::{AccountId, Amount, Sequence};

/// One recorded distribution attempt. Immutable once written.
///
/// The record is written before settlement starts, so it documents what the
/// distributor set out to do; per-recipient success must be reconciled from
/// the returned outcome or from balances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Distribution {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    /// The account the funds were drawn from.
    pub distributor: AccountId,
    /// Amount intended for each recipient.
    pub amount: Amount,
    pub recipients: Vec<AccountId>,
    pub recorded_at: Sequence,
}
