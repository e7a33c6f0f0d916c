//! Snapshot persistence for RELIEF.
//!
//! The node serializes its full state into snapshot bytes; this crate owns
//! the seam those bytes cross. Everything above depends only on
//! [`SnapshotStore`]; backends decide where the bytes live.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Where snapshot bytes are kept.
pub trait SnapshotStore {
    /// Persist `bytes`, replacing any previous snapshot atomically.
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError>;

    /// Load the last saved snapshot, or `None` if none exists.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
}
