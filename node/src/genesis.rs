//! Genesis bootstrap for a fresh node.

use serde::{Deserialize, Serialize};

use relief_claims::FundingStrategy;
use relief_types::{AccountId, ProtocolParams};

/// Everything a fresh node needs to start: the owner, the parameter set,
/// the claim funding choice, and any roles assigned from the first
/// sequence onward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genesis {
    pub owner: AccountId,
    pub params: ProtocolParams,
    /// The claim funding source. Deliberately has no default — a deployment
    /// must pick one.
    pub funding: FundingStrategy,
    pub admins: Vec<AccountId>,
    pub distributor: Option<AccountId>,
}

impl Genesis {
    /// Minimal genesis: an owner, default parameters, mint-on-claim funding.
    pub fn new(owner: AccountId, funding: FundingStrategy) -> Self {
        Self {
            owner,
            params: ProtocolParams::relief_defaults(),
            funding,
            admins: Vec::new(),
            distributor: None,
        }
    }

    pub fn with_params(mut self, params: ProtocolParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_admin(mut self, admin: AccountId) -> Self {
        self.admins.push(admin);
        self
    }

    pub fn with_distributor(mut self, distributor: AccountId) -> Self {
        self.distributor = Some(distributor);
        self
    }
}
