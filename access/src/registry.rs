//! The role registry — owner, admin set, distributor.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use relief_types::AccountId;

use crate::error::AccessError;
use crate::role::{Capability, Role};

/// Holds every role assignment in the system.
///
/// Authorization failures never mutate state; the caller-facing mutators
/// check the acting account first and return [`AccessError::NotAuthorized`]
/// before touching anything.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessRegistry {
    owner: AccountId,
    admins: HashSet<AccountId>,
    distributor: Option<AccountId>,
}

impl AccessRegistry {
    /// Create a registry with `owner` as the singleton owner.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            admins: HashSet::new(),
            distributor: None,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn distributor(&self) -> Option<&AccountId> {
        self.distributor.as_ref()
    }

    pub fn admins(&self) -> impl Iterator<Item = &AccountId> {
        self.admins.iter()
    }

    /// `caller == owner || admins[caller]` — the predicate every other
    /// component's privileged operations reduce to.
    pub fn is_admin(&self, caller: &AccountId) -> bool {
        *caller == self.owner || self.admins.contains(caller)
    }

    /// The strongest role held by `account`.
    pub fn role_of(&self, account: &AccountId) -> Role {
        if *account == self.owner {
            Role::Owner
        } else if self.admins.contains(account) {
            Role::Admin
        } else if self.distributor.as_ref() == Some(account) {
            Role::Distributor
        } else {
            Role::None
        }
    }

    /// Whether `caller` holds `capability`.
    pub fn has_capability(&self, caller: &AccountId, capability: Capability) -> bool {
        match capability {
            Capability::TransferOwnership | Capability::ManageRoles => *caller == self.owner,
            Capability::Distribute => self.distributor.as_ref() == Some(caller),
            _ if capability.granted_to_admins() => self.is_admin(caller),
            _ => false,
        }
    }

    /// Capability check as a `Result`, for use with `?`.
    pub fn require(&self, caller: &AccountId, capability: Capability) -> Result<(), AccessError> {
        if self.has_capability(caller, capability) {
            Ok(())
        } else {
            Err(AccessError::NotAuthorized {
                caller: caller.to_string(),
                capability,
            })
        }
    }

    /// Transfer the owner role. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), AccessError> {
        self.require(caller, Capability::TransferOwnership)?;
        self.admins.remove(&new_owner);
        self.owner = new_owner;
        Ok(())
    }

    /// Add an account to the admin set. Owner-only.
    pub fn add_admin(&mut self, caller: &AccountId, account: AccountId) -> Result<(), AccessError> {
        self.require(caller, Capability::ManageRoles)?;
        self.admins.insert(account);
        Ok(())
    }

    /// Remove an account from the admin set. Owner-only.
    pub fn remove_admin(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
    ) -> Result<(), AccessError> {
        self.require(caller, Capability::ManageRoles)?;
        self.admins.remove(account);
        Ok(())
    }

    /// Designate the distribution account. Owner-only.
    pub fn set_distributor(
        &mut self,
        caller: &AccountId,
        account: AccountId,
    ) -> Result<(), AccessError> {
        self.require(caller, Capability::ManageRoles)?;
        self.distributor = Some(account);
        Ok(())
    }

    // ── Unchecked mutators ───────────────────────────────────────────────
    // Used during genesis bootstrap and by executed governance actions,
    // where authorization was decided elsewhere.

    pub fn promote_admin(&mut self, account: AccountId) {
        self.admins.insert(account);
    }

    pub fn demote_admin(&mut self, account: &AccountId) {
        self.admins.remove(account);
    }

    pub fn designate_distributor(&mut self, account: AccountId) {
        self.distributor = Some(account);
    }
}
