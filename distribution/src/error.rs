use thiserror::Error;

use relief_types::ErrorKind;

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("{0}")]
    Access(#[from] relief_access::AccessError),

    #[error("{len} recipients exceeds limit {max}")]
    TooManyRecipients { len: usize, max: usize },

    #[error("distribution {0} not found")]
    NotFound(u64),
}

impl DistributionError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::Authorization,
            Self::TooManyRecipients { .. } => ErrorKind::ResourceLimit,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
