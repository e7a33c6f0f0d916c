use thiserror::Error;

use relief_types::ErrorKind;

#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("no eligibility record for account {0}")]
    NotFound(String),

    #[error("account {0} is already registered")]
    AlreadyRegistered(String),

    #[error("account {0} is not eligible")]
    NotEligible(String),

    #[error("cooldown active: {remaining} ticks remaining")]
    CooldownActive { remaining: u64 },

    #[error("{0}")]
    Access(#[from] relief_access::AccessError),

    #[error("claim funding failed: {0}")]
    Funding(#[from] relief_ledger::LedgerError),
}

impl ClaimError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyRegistered(_) => ErrorKind::StateConflict,
            Self::NotEligible(_) | Self::CooldownActive { .. } => ErrorKind::PolicyViolation,
            Self::Access(_) => ErrorKind::Authorization,
            Self::Funding(e) => e.kind(),
        }
    }
}
