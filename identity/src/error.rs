use thiserror::Error;

use relief_types::ErrorKind;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity {0} not found")]
    NotFound(u64),

    #[error("caller {caller} may not act on identity {id}")]
    NotAuthorized { caller: String, id: u64 },

    #[error("{0}")]
    Access(#[from] relief_access::AccessError),

    #[error("identity registry is paused")]
    Paused,

    #[error("content hash must not be empty")]
    InvalidHash,

    #[error("metadata of {len} bytes exceeds limit {max}")]
    InvalidMetadata { len: usize, max: usize },

    #[error("identity {0} is already verified")]
    AlreadyVerified(u64),

    #[error("identity {0} is already revoked")]
    AlreadyRevoked(u64),

    #[error("identity {0} is revoked and can no longer be verified")]
    Revoked(u64),

    #[error("identity {0} is not verified")]
    NotVerified(u64),

    #[error("identities are not transferable")]
    TransferNotAllowed,

    #[error("batch of {len} entries exceeds limit {max}")]
    BatchLimitExceeded { len: usize, max: usize },
}

impl IdentityError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotAuthorized { .. } | Self::Access(_) => ErrorKind::Authorization,
            Self::Paused | Self::TransferNotAllowed | Self::NotVerified(_) => {
                ErrorKind::PolicyViolation
            }
            Self::InvalidHash | Self::InvalidMetadata { .. } => ErrorKind::InvalidInput,
            Self::AlreadyVerified(_) | Self::AlreadyRevoked(_) | Self::Revoked(_) => {
                ErrorKind::StateConflict
            }
            Self::BatchLimitExceeded { .. } => ErrorKind::ResourceLimit,
        }
    }
}
