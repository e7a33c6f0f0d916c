//! Roles and the capabilities they grant.

use serde::{Deserialize, Serialize};

/// The role an account holds, as seen by the registry.
///
/// Roles are not exclusive — the distributor may also sit in the admin set —
/// but capability checks always resolve against the strongest applicable
/// role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The singleton owner, set at creation and transferable.
    Owner,
    /// Member of the admin set.
    Admin,
    /// The designated distribution account, checked by equality.
    Distributor,
    /// No privileged role.
    None,
}

/// A privileged action an account may be allowed to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Hand the owner role to another account.
    TransferOwnership,
    /// Add or remove admins, designate the distributor.
    ManageRoles,
    /// Create new supply.
    Mint,
    /// Pause or unpause a component.
    Pause,
    /// Add or remove accounts from the blacklist.
    ManageBlacklist,
    /// Verify an identity record.
    VerifyIdentity,
    /// Revoke an identity record.
    RevokeIdentity,
    /// Register beneficiaries and flip eligibility flags.
    SetEligibility,
    /// Run bulk distributions from the distribution pool.
    Distribute,
}

impl Capability {
    /// Whether the admin set (as opposed to the owner alone) grants this
    /// capability. Ownership transfer and role management stay owner-only;
    /// distribution is granted by designation, never by admin membership.
    pub fn granted_to_admins(&self) -> bool {
        matches!(
            self,
            Self::Mint
                | Self::Pause
                | Self::ManageBlacklist
                | Self::VerifyIdentity
                | Self::RevokeIdentity
                | Self::SetEligibility
        )
    }
}
