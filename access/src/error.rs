use thiserror::Error;

use crate::role::Capability;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("account {caller} lacks the {capability:?} capability")]
    NotAuthorized {
        caller: String,
        capability: Capability,
    },
}
