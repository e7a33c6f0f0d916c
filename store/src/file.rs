//! File-backed snapshot store.

use std::fs;
use std::path::PathBuf;

use crate::{SnapshotStore, StoreError};

/// Keeps the snapshot in a single file, replaced via write-then-rename so a
/// crash mid-save never leaves a truncated snapshot behind.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone();
        staging.set_extension("tmp");
        staging
    }
}

impl SnapshotStore for FileStore {
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let staging = self.staging_path();
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
