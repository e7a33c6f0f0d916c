use thiserror::Error;

use relief_types::ErrorKind;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    NotFound(u64),

    #[error("account {0} has already voted on this proposal")]
    AlreadyVoted(String),

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(u64),

    #[error("threshold not met: {votes_for} for / {votes_against} against, need {min_votes} for and a majority")]
    ThresholdNotMet {
        votes_for: u32,
        votes_against: u32,
        min_votes: u32,
    },

    #[error("description of {len} bytes exceeds limit {max}")]
    DescriptionTooLong { len: usize, max: usize },
}

impl GovernanceError {
    /// Stable classification for the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyVoted(_) | Self::AlreadyExecuted(_) => ErrorKind::StateConflict,
            Self::ThresholdNotMet { .. } => ErrorKind::PolicyViolation,
            Self::DescriptionTooLong { .. } => ErrorKind::InvalidInput,
        }
    }
}
