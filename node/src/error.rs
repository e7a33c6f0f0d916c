//! Node-level error aggregation.

use thiserror::Error;

use relief_types::ErrorKind;

/// Every failure an operation can return, classified by [`NodeError::kind`].
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("sequence {now} precedes the node clock {clock}")]
    ClockRegression { now: u64, clock: u64 },

    #[error("privacy level {0} is out of range (0..=2)")]
    InvalidPrivacyLevel(u8),

    #[error(transparent)]
    Access(#[from] relief_access::AccessError),

    #[error(transparent)]
    Ledger(#[from] relief_ledger::LedgerError),

    #[error(transparent)]
    Identity(#[from] relief_identity::IdentityError),

    #[error(transparent)]
    Claim(#[from] relief_claims::ClaimError),

    #[error(transparent)]
    Distribution(#[from] relief_distribution::DistributionError),

    #[error(transparent)]
    Governance(#[from] relief_governance::GovernanceError),
}

impl NodeError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClockRegression { .. } | Self::InvalidPrivacyLevel(_) => ErrorKind::InvalidInput,
            Self::Access(_) => ErrorKind::Authorization,
            Self::Ledger(e) => e.kind(),
            Self::Identity(e) => e.kind(),
            Self::Claim(e) => e.kind(),
            Self::Distribution(e) => e.kind(),
            Self::Governance(e) => e.kind(),
        }
    }
}
