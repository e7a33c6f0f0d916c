use thiserror::Error;

use relief_types::ErrorKind;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("caller {caller} may not move funds of {holder}")]
    NotAuthorized { caller: String, holder: String },

    #[error("{0}")]
    Access(#[from] relief_access::AccessError),

    #[error("ledger is paused")]
    Paused,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("account {0} is blacklisted")]
    Blacklisted(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("supply cap exceeded: minting {requested} onto {supply} breaches cap {cap}")]
    SupplyCapExceeded {
        requested: u128,
        supply: u128,
        cap: u128,
    },

    #[error("batch of {len} entries exceeds limit {max}")]
    BatchLimitExceeded { len: usize, max: usize },

    #[error("arithmetic overflow")]
    Overflow,
}

impl LedgerError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } | Self::Access(_) => ErrorKind::Authorization,
            Self::Paused | Self::Blacklisted(_) => ErrorKind::PolicyViolation,
            Self::InvalidAmount | Self::Overflow => ErrorKind::InvalidInput,
            Self::InsufficientBalance { .. } => ErrorKind::PolicyViolation,
            Self::SupplyCapExceeded { .. } | Self::BatchLimitExceeded { .. } => {
                ErrorKind::ResourceLimit
            }
        }
    }
}
