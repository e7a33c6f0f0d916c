//! Where claimed credits come from.

use serde::{Deserialize, Serialize};

use relief_types::AccountId;

/// The funding source for successful claims.
///
/// A deployment must choose one explicitly; both preserve
/// `sum(balances) == total_supply` by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingStrategy {
    /// Mint new supply directly to the claimant. Claims fail with
    /// `SupplyCapExceeded` once the cap is reached.
    MintOnClaim,
    /// Debit a pooled treasury balance. Claims fail with
    /// `InsufficientBalance` when the pool runs dry.
    DebitTreasury { treasury: AccountId },
}
